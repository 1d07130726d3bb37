//! DTOs for the admin audit log endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::domain::entities::{AdminLog, NewAdminLog};

/// Request body for `POST /api/admin-logs`. The timestamp is always
/// assigned by the server.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminLogRequest {
    #[validate(custom(function = "not_blank", message = "Action cannot be blank"))]
    pub action: String,

    #[validate(
        custom(function = "not_blank", message = "Admin name cannot be blank"),
        length(max = 255)
    )]
    pub admin_name: String,
}

impl From<CreateAdminLogRequest> for NewAdminLog {
    fn from(req: CreateAdminLogRequest) -> Self {
        NewAdminLog::new(req.action, req.admin_name)
    }
}

#[derive(Debug, Deserialize)]
pub struct AdminLogListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLogResponse {
    pub id: i64,
    pub action: String,
    pub admin_name: String,
    pub timestamp: DateTime<Utc>,
}

impl From<AdminLog> for AdminLogResponse {
    fn from(log: AdminLog) -> Self {
        AdminLogResponse {
            id: log.id,
            action: log.action,
            admin_name: log.admin_name,
            timestamp: log.timestamp,
        }
    }
}
