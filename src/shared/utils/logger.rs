use log::{debug, error, info, warn};
use std::sync::Once;

use crate::shared::domain::value_objects::ProviderId;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at application startup
pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info) // Default level
            .filter_module("animerec_lib", log::LevelFilter::Debug) // More verbose for our crate
            .filter_module("reqwest", log::LevelFilter::Warn) // Reduce HTTP noise
            .filter_module("hyper", log::LevelFilter::Warn)
            .filter_module("tokio", log::LevelFilter::Warn) // Reduce tokio noise
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .init();

        info!("Logging system initialized");
    });
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log API calls
    pub fn api_call(provider: &str, endpoint: &str, status: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!(
                "API: {} {} {} in {}ms",
                provider, endpoint, status, duration
            ),
            None => debug!("API: Starting {} {}", provider, endpoint),
        }
    }

    /// Log the terminal outcome of a resolution chain
    pub fn resolution_outcome(task: &str, subject: &str, source: ProviderId, value: &str) {
        let message = outcome_message(task, subject, source, value);
        if source.is_fallback() {
            warn!("{}", message);
        } else {
            info!("{}", message);
        }
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        info!("Performance: {} took {}ms ({})", self.operation, duration, info);
        duration
    }
}

fn outcome_message(task: &str, subject: &str, source: ProviderId, value: &str) -> String {
    match (source.is_fallback(), task) {
        (false, _) => format!("Resolve {}: {} resolved via {}", task, subject, source),
        (true, "image") => format!("Resolve {}: {} fell back to placeholder", task, subject),
        (true, _) => format!(
            "Resolve {}: no provider {} accepted for {}, using '{}'",
            task, task, subject, value
        ),
    }
}
