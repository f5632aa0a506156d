//! Logging setup shared by the command line tools

use tracing_subscriber::EnvFilter;

/// Install a stderr tracing subscriber
///
/// `RUST_LOG` takes precedence over `default_level`. Fails if a subscriber
/// is already installed.
pub fn init(default_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
}
