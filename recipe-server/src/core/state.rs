//! Application state shared by every handler

use std::sync::Arc;

use sqlx::SqlitePool;

use super::Config;
use crate::auth::{JwtConfig, JwtService};
use crate::db::DbService;
use crate::services::MediaStore;
use crate::utils::AppError;

/// Cloned per request; every field is cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtService>,
    pub media: MediaStore,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Self::with_pool(config, db.pool).await
    }

    /// Build state around an existing pool (migrations already applied)
    pub async fn with_pool(config: Config, pool: SqlitePool) -> Result<Self, AppError> {
        let media = MediaStore::new(
            config.media_dir.clone(),
            config.public_url.clone(),
            config.max_image_bytes,
        );
        media.init().await?;

        let jwt = JwtService::with_config(JwtConfig::new(
            config.jwt_secret.clone(),
            config.jwt_expiration_minutes,
        ));

        Ok(Self {
            pool,
            config: Arc::new(config),
            jwt: Arc::new(jwt),
            media,
        })
    }

    /// Absolute URL for a path on this server
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.config.public_url, path)
    }
}
