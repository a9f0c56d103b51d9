//! Health command handler

use anyhow::{Context, Result};
use colored::*;
use herald_client::HeraldClient;

use crate::config::Config;

/// Check that the Herald service answers its health endpoint
pub async fn check_health(config: &Config) -> Result<()> {
    let client = HeraldClient::new(&config.herald_url);

    let body = client
        .health()
        .await
        .with_context(|| format!("Herald at {} is not reachable", client.base_url()))?;

    println!(
        "{} {} ({})",
        "✓".green().bold(),
        client.base_url().bold(),
        body.trim().dimmed()
    );

    Ok(())
}
