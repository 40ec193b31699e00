//! Logging
//!
//! The handler reports through [`AlertLog`], which is injected into router
//! state. [`TracingLog`] forwards to `tracing`; [`init_logging`] installs the
//! process-wide subscriber once at startup.

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Sink for handler log lines. Logging never fails from the caller's view.
pub trait AlertLog: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// [`AlertLog`] backed by `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl AlertLog for TracingLog {
    fn info(&self, message: &str) {
        info!(target: "alert_api::summarize", "{}", message);
    }

    fn warning(&self, message: &str) {
        warn!(target: "alert_api::summarize", "{}", message);
    }

    fn error(&self, message: &str) {
        error!(target: "alert_api::summarize", "{}", message);
    }
}

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_log_without_subscriber() {
        // No subscriber installed: events are dropped silently
        let log = TracingLog;
        log.info("info line");
        log.warning("warning line");
        log.error("error line");
    }
}
