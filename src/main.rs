//! Aggregator Demo — Binary Entrypoint
//! Runs the fetch/normalize/transform pipeline once over every source and
//! once restricted to GitHub, printing each record as a JSON line.

use multi_source_aggregator::{run_pipeline, Source};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    println!("=== ALL SOURCES ===");
    for record in run_pipeline(None).await? {
        println!("{}", serde_json::to_string(&record)?);
    }

    println!("\n=== GITHUB ONLY ===");
    for record in run_pipeline(Some(Source::Github)).await? {
        println!("{}", serde_json::to_string(&record)?);
    }

    Ok(())
}
