//! Observability: tracing init.
//!
//! Reads `ObservabilityConfig` for THEMELEON_QUIET, THEMELEON_LOG_LEVEL and
//! THEMELEON_LOG_JSON. `RUST_LOG` wins over both when set.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Filter directive derived from the config.
/// Quiet mode keeps only WARN and above for the themeleon targets.
pub fn filter_directive(cfg: &crate::config::ObservabilityConfig) -> String {
    if cfg.quiet {
        "themeleon=warn,themeleon_engine=warn".to_string()
    } else {
        cfg.log_level.clone()
    }
}

/// Initialize tracing. Call once at process startup; later calls are no-ops.
pub fn init_tracing() {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level = filter_directive(cfg);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
}
