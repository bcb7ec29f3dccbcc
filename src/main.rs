use anyhow::{Context, Result};
use daily_digest::{DigestConfig, digest, logging};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Local runs keep their API keys in .env; CI injects them directly.
    let dotenv = dotenvy::dotenv().ok();

    let config = DigestConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging).context("Failed to initialise logging")?;

    if let Some(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let document = digest::run(&config)
        .await
        .context("Failed to generate the daily digest")?;

    info!(
        unavailable_sections = document.unavailable_sections(),
        "Digest written to {}",
        config.output.path.display()
    );
    Ok(())
}
