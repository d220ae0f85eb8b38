// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stackseed::config::Settings;
use stackseed::provider::AwsProvider;
use stackseed::provision;
use stackseed::session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout only carries the outputs
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::parse();
    info!("Starting stackseed, variant={:?}", settings.variant);

    // Load configuration
    let config = settings.load_stack_config()?;
    let region = config.region()?;

    let provider = AwsProvider::new(region).await;
    info!(
        "AWS clients ready, region={}",
        provider.region().unwrap_or("<default>")
    );

    let session = Session::new(&provider, &config).with_work_dir(settings.work_dir.clone());
    let outputs = provision::run(session, settings.variant).await?;

    let json = serde_json::to_string_pretty(&outputs)?;
    if let Some(path) = &settings.outputs_file {
        std::fs::write(path, &json)
            .with_context(|| format!("Failed to write outputs to {}", path.display()))?;
    }
    println!("{}", json);

    Ok(())
}
