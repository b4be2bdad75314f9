// ==========================================
// Safety Operations Platform - CLI entry
// ==========================================
// Usage: safety-ops <incidents|telemetry|training> <file>
// Reads one export file, runs the matching import profile against
// the configured data source, prints the JSON summary.
// ==========================================

use anyhow::{anyhow, bail, Context};
use safety_ops::api::ImportApi;
use safety_ops::config::AppConfig;
use safety_ops::logging;
use std::fs;
use std::path::Path;

const USAGE: &str = "usage: safety-ops <incidents|telemetry|training> <file>";

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let profile = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let file_path = args.next().ok_or_else(|| anyhow!(USAGE))?;

    let bytes = fs::read(&file_path).with_context(|| format!("reading {}", file_path))?;
    let file_name = Path::new(&file_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_path.as_str());

    let config = AppConfig::from_env();
    let api = ImportApi::new(config.data_source);

    let response = match profile.as_str() {
        "incidents" => api.import_incidents(file_name, &bytes).await?,
        "telemetry" => api.import_telemetry(file_name, &bytes).await?,
        "training" => api.import_training(file_name, &bytes).await?,
        other => bail!("unknown profile '{}'\n{}", other, USAGE),
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
