//! Logging and tracing utilities

use crate::AppConfig;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with default configuration
pub fn init_tracing() {
    init_tracing_with(&AppConfig::default());
}

/// Initialize tracing from an [`AppConfig`]
///
/// `RUST_LOG` takes precedence over `config.log_level` when set. Output goes
/// to stderr so command output on stdout stays clean.
pub fn init_tracing_with(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    debug!(
        "Tracing initialized for {} (json: {})",
        config.app_name, config.json_logs
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    // Installs the global subscriber, so only one test may call it
    #[test]
    fn test_init_tracing_with_json() {
        let config = AppConfig {
            json_logs: true,
            log_level: "debug".to_string(),
            ..AppConfig::default()
        };
        init_tracing_with(&config);
        assert!(tracing::dispatcher::has_been_set());
    }
}
