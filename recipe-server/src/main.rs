//! recipe-server: recipe sharing REST backend
//!
//! Serves the JSON API, uploaded media and short links over HTTP.

use recipe_server::core::{Config, Server};
use recipe_server::utils::logger;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    logger::init_logger_with_file(&config.log_level, config.log_dir.as_deref());

    tracing::info!(
        "Starting recipe-server v{} (env: {})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );
    if !config.is_production() && std::env::var("JWT_SECRET").is_err() {
        tracing::warn!("JWT_SECRET not set, using development fallback secret");
    }

    Server::new(config).run().await
}
