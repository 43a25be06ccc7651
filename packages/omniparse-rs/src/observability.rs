//! `tracing` setup shared by the server and the one-shot CLI commands.
//!
//! Everything goes to stderr so stdout stays reserved for command output.
use std::sync::OnceLock;

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Output encoding for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_filter`.
/// Later calls are no-ops.
pub fn init_logging(format: LogFormat, default_filter: &str) {
    INIT.get_or_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        let registry = tracing_subscriber::registry().with(env_filter);
        let result = match format {
            LogFormat::Text => registry
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
                .try_init(),
            LogFormat::Json => registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
        };
        if let Err(e) = result {
            eprintln!("logging already initialised elsewhere: {e}");
        }
    });
}
