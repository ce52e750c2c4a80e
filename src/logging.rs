//! # Structured Logging
//!
//! Environment-aware console logging built on `tracing`. Output goes to
//! stdout; the level comes from `RUST_LOG`, then configuration, then the
//! environment (`debug` outside production, `info` in production).

use crate::checks::CheckStatus;
use crate::config::{LogFormat, LoggingConfig};
use crate::status::CalculatedStatus;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-derived defaults
pub fn init_structured_logging() {
    init_with_config(&LoggingConfig::default());
}

/// Initialize structured logging. Only the first call has an effect.
pub fn init_with_config(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(
                config
                    .level
                    .clone()
                    .unwrap_or_else(|| get_log_level(&environment).to_string()),
            )
        });

        let layer = match config.format {
            LogFormat::Json => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .json()
                .with_filter(filter)
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stdout()))
                .with_filter(filter)
                .boxed(),
        };

        // Another subscriber may already be installed by the embedding process
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %environment,
            format = ?config.format,
            "Structured logging initialized"
        );
    });
}

/// GATE_ENV || APP_ENV || 'development'
fn get_environment() -> String {
    std::env::var("GATE_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log the verdict of one prerequisite check
pub fn log_check_operation(
    correlation_id: Uuid,
    check_id: &str,
    cluster_name: &str,
    status: CheckStatus,
    fail_reason: Option<&str>,
) {
    tracing::info!(
        correlation_id = %correlation_id,
        check = %check_id,
        cluster = %cluster_name,
        status = %status,
        fail_reason = fail_reason,
        "CHECK_OPERATION"
    );
}

/// Log a request-level status rollup
pub fn log_rollup_operation(
    request_id: i64,
    cluster_name: &str,
    stages: usize,
    tasks: usize,
    calculated: &CalculatedStatus,
) {
    tracing::info!(
        request_id = request_id,
        cluster = %cluster_name,
        stages = stages,
        tasks = tasks,
        status = %calculated.status,
        percent = calculated.percent,
        "ROLLUP_OPERATION"
    );
}
