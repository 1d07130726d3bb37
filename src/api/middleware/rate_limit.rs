//! Per-client rate limiting using the token bucket algorithm.
//!
//! # Limits
//!
//! - **Rate**: 2 requests per second
//! - **Burst**: 100 requests
//!
//! Requests exceeding the limit receive `429 Too Many Requests`.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

const PER_SECOND: u64 = 2;
const BURST_SIZE: u32 = 100;

type Layer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Rate limiter keyed by the socket peer address.
///
/// Requires the server to be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn layer() -> Result<Layer<PeerIpKeyExtractor>> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(PER_SECOND)
        .burst_size(BURST_SIZE)
        .finish()
        .context("invalid rate limit configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Rate limiter keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`,
/// falling back to the peer address.
///
/// Use only behind a trusted reverse proxy; clients can forge these headers.
pub fn proxy_layer() -> Result<Layer<SmartIpKeyExtractor>> {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(PER_SECOND)
        .burst_size(BURST_SIZE)
        .finish()
        .context("invalid rate limit configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
