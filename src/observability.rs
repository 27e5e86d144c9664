//! Logging setup for the binaries.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! caller's job. `RUST_LOG` controls levels and defaults to `warn`, which keeps
//! unresolved-image warnings visible without cluttering normal output.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One line per event.
    #[default]
    Compact,
    /// JSON objects, one per line.
    Json,
}

/// Installs the global subscriber writing to stderr.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        match format {
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        fmt::layer()
                            .compact()
                            .with_target(false)
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .init();
            }
        }
    });
}
