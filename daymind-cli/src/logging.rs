use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVES: &str = "warn";
const VERBOSE_LOG_DIRECTIVES: &str = "info,daymind_core=debug";

/// Log to stderr so stdout stays clean for `--json`. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbose: bool) -> Result<()> {
    let fallback = if verbose {
        VERBOSE_LOG_DIRECTIVES
    } else {
        DEFAULT_LOG_DIRECTIVES
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|e| anyhow!("invalid log filter: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("logger already initialised: {e}"))
}
