//! novacrest - storefront backend for a chain of Lagos pharmacies.
//!
//! Serves the product catalog, blog and newsletter API and assigns
//! customers to their nearest branch.

mod cli;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let default_filter = if cli::is_verbose() {
        "novacrest=info,novacrest_server=info,tower_http=info"
    } else {
        "novacrest=warn,novacrest_server=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    cli::run().await
}
