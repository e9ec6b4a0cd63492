use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autodealer_rust=info,tower_http=info".into()),
        ) // Default to info if RUST_LOG not set
        .with(fmt::layer())
        .init();

    if let Err(e) = autodealer_rust::cli::run().await {
        tracing::error!("Fatal error: {:?}", e);
        return Err(e);
    }
    Ok(())
}
