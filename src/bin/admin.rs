//! CLI administration tool for ride-admin.
//!
//! Provides driver verification, audit log access, platform statistics and
//! database diagnostics without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Platform statistics
//! cargo run --bin admin -- stats
//!
//! # Verify or reject a pending driver (recorded in the audit log)
//! cargo run --bin admin -- driver verify 42 --admin alice
//! cargo run --bin admin -- driver reject 42 --admin alice -y
//!
//! # Audit log
//! cargo run --bin admin -- log list --limit 20
//! cargo run --bin admin -- log add "Suspended promo code SPRING" --admin alice
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database settings as the server: `DATABASE_URL`, or
//! `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`.

use ride_admin::config::{self, Config};
use ride_admin::domain::entities::{Driver, DriverStatus, NewAdminLog};
use ride_admin::infrastructure::database;
use ride_admin::state::{AppState, DynAdminLogService};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for administering the ride-hailing backend.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show platform statistics
    Stats,

    /// Driver verification
    Driver {
        #[command(subcommand)]
        action: DriverAction,
    },

    /// Admin audit log
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DriverAction {
    /// Mark a driver as VERIFIED
    Verify(DecisionArgs),

    /// Mark a driver as REJECTED
    Reject(DecisionArgs),
}

#[derive(clap::Args)]
struct DecisionArgs {
    /// Driver ID
    id: i64,

    /// Name recorded in the audit log (prompted if omitted)
    #[arg(short, long)]
    admin: Option<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
}

#[derive(Subcommand)]
enum LogAction {
    /// List entries, newest first
    List {
        /// Maximum number of entries
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Append an entry
    Add {
        /// Description of the action taken
        action: String,

        /// Name recorded with the entry
        #[arg(short, long)]
        admin: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let pool = connect(&config).await?;
    let state = AppState::new(Arc::new(pool.clone()));

    match cli.command {
        Commands::Stats => handle_stats(&state).await?,
        Commands::Driver { action } => handle_driver_action(action, &state).await?,
        Commands::Log { action } => handle_log_action(action, &state).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<PgPool> {
    database::connect(config)
        .await
        .context("Failed to connect to database")
}

/// Displays row counts, with drivers broken down by verification status.
async fn handle_stats(state: &AppState) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users = state.user_service.count_users().await?;
    let drivers = state.driver_service.count_by_status().await?;
    let rides = state.ride_service.count_rides().await?;
    let earnings = state.earning_service.count_earnings().await?;
    let logs = state.admin_log_service.count_logs().await?;

    println!("  Users:           {}", users.to_string().bright_green().bold());
    println!(
        "  Drivers:         {}",
        drivers.total().to_string().bright_green().bold()
    );
    println!("    pending:       {}", drivers.pending.to_string().yellow());
    println!("    verified:      {}", drivers.verified.to_string().green());
    println!("    rejected:      {}", drivers.rejected.to_string().red());
    println!("  Rides:           {}", rides.to_string().bright_green().bold());
    println!(
        "  Earnings:        {}",
        earnings.to_string().bright_green().bold()
    );
    println!("  Admin log:       {}", logs.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Outcome of a driver review. Only the two terminal statuses can be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Verify,
    Reject,
}

impl Decision {
    fn target(self) -> DriverStatus {
        match self {
            Decision::Verify => DriverStatus::Verified,
            Decision::Reject => DriverStatus::Rejected,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Decision::Verify => "Verified",
            Decision::Reject => "Rejected",
        }
    }
}

impl DriverAction {
    fn into_decision(self) -> (Decision, DecisionArgs) {
        match self {
            DriverAction::Verify(args) => (Decision::Verify, args),
            DriverAction::Reject(args) => (Decision::Reject, args),
        }
    }
}

fn audit_entry(decision: Decision, driver: &Driver, admin: String) -> NewAdminLog {
    NewAdminLog::new(
        format!(
            "{} driver {} ({})",
            decision.verb(),
            driver.id,
            driver.owner.full_name()
        ),
        admin,
    )
}

/// Verifies or rejects a driver and records the decision in the audit log.
///
/// # Flow
///
/// 1. Load the driver and show its current state
/// 2. Resolve the operator name (flag or prompt)
/// 3. Validate the audit entry, so a bad operator name changes nothing
/// 4. Confirm (unless `--yes`)
/// 5. Apply the status change through the driver service
/// 6. Append the audit log entry
async fn handle_driver_action(action: DriverAction, state: &AppState) -> Result<()> {
    let (decision, args) = action.into_decision();
    let target = decision.target();

    let driver = state.driver_service.get_driver(args.id).await?;
    print_driver(&driver);

    if driver.verification_status == target {
        println!(
            "{}",
            format!("⚠️  Driver is already {target}").yellow()
        );
        return Ok(());
    }

    let admin = match args.admin {
        Some(name) => name,
        None => Input::<String>::new().with_prompt("Admin name").interact_text()?,
    };

    let entry = audit_entry(decision, &driver, admin);
    DynAdminLogService::check_entry(&entry)?;

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Set driver {} to {target}?", driver.id))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let updated = match decision {
        Decision::Verify => state.driver_service.verify_driver(driver.id).await?,
        Decision::Reject => state.driver_service.reject_driver(driver.id).await?,
    };

    let logged = state.admin_log_service.add_log(entry).await?;

    println!();
    println!(
        "{}",
        format!("✅ Driver {} is now {}", updated.id, updated.verification_status)
            .green()
            .bold()
    );
    println!(
        "  Logged as entry {}",
        logged.id.to_string().bright_black()
    );
    println!();

    Ok(())
}

fn print_driver(driver: &Driver) {
    println!("  Driver:  {}", driver.id.to_string().bright_white().bold());
    println!("  Name:    {}", driver.owner.full_name().cyan());
    println!("  Email:   {}", driver.owner.email.bright_black());
    println!("  License: {}", driver.license_number.cyan());
    println!(
        "  Expires: {}",
        driver.license_expiry_date.to_string().bright_black()
    );
    println!("  Status:  {}", colored_status(driver.verification_status));
    println!();
}

fn colored_status(status: DriverStatus) -> ColoredString {
    match status {
        DriverStatus::Pending => status.as_str().yellow(),
        DriverStatus::Verified => status.as_str().green(),
        DriverStatus::Rejected => status.as_str().red(),
    }
}

/// Dispatches audit log commands.
///
/// # Output Format
///
/// ```text
/// 📋 Admin Log
///
///   ID   Timestamp          Admin          Action
///   ───────────────────────────────────────────────────────────────────────────
///   12   2026-03-02 09:15   alice          Verified driver 42 (John Doe)
/// ```
async fn handle_log_action(action: LogAction, state: &AppState) -> Result<()> {
    match action {
        LogAction::List { limit } => {
            println!("{}", "📋 Admin Log".bright_blue().bold());
            println!();

            let logs = state.admin_log_service.list_logs(limit).await?;

            if logs.is_empty() {
                println!("{}", "  No entries found".yellow());
                return Ok(());
            }

            println!(
                "  {:<4} {:<18} {:<14} {}",
                "ID".bright_white().bold(),
                "Timestamp".bright_white().bold(),
                "Admin".bright_white().bold(),
                "Action".bright_white().bold()
            );
            println!("  {}", "─".repeat(75).bright_black());

            for log in &logs {
                println!(
                    "  {:<4} {:<18} {:<14} {}",
                    log.id.to_string().bright_black(),
                    log.timestamp
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black(),
                    log.admin_name.cyan(),
                    log.action
                );
            }

            println!();
            println!("  Shown: {}", logs.len().to_string().bright_white().bold());
            println!();
        }
        LogAction::Add { action, admin } => {
            let entry = state
                .admin_log_service
                .add_log(NewAdminLog::new(action, admin))
                .await?;

            println!(
                "{}",
                format!("✅ Logged entry {}", entry.id).green().bold()
            );
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  URL:        {}",
                config::mask_connection_string(&config.database_url).bright_black()
            );
            println!(
                "  Pool:       {} max connections",
                config.db_max_connections.to_string().bright_white()
            );
            println!(
                "  Migrations: {} applied",
                migrations.to_string().bright_white()
            );
            println!();
        }
    }

    Ok(())
}
