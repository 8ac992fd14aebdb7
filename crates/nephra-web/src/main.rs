//! Nephra web server.
//!
//! Run with: cargo run -p nephra-web

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = nephra_web::config::ServiceConfig::load()?;
    if !config.validate() {
        anyhow::bail!("invalid service configuration: blend weights must sum to 1 and timeouts must be positive");
    }
    let addr = config.bind_addr()?;

    // Load model artifacts before binding so a broken deployment fails loudly
    let state = nephra_web::state::AppState::from_config(config)?;
    let app = nephra_web::router::build_router(state);

    info!("nephra-web listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
