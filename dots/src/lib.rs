use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

pub mod errors;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "DOTS_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Log to stderr so stdout stays reserved for rendered output.
pub fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("{err}"))
}
