//! Vectorization benchmark harness entry point.

use anyhow::Result;
use vecbench::config::HarnessConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = HarnessConfig::default();
    vecbench::run_harness(&config)?;

    Ok(())
}
