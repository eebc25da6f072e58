use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "tag_genie=warn";
const VERBOSE_LOG_FILTER: &str = "tag_genie=debug";

/// Installs a stderr subscriber so log lines stay out of the wizard's stdout.
///
/// `RUST_LOG` wins over both defaults.
pub fn init(verbose: bool) -> Result<()> {
    let fallback = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}
