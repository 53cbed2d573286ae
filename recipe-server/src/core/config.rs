//! Server configuration
//!
//! Loaded from environment variables (after `dotenvy::dotenv()`):
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `DATABASE_PATH` | `recipes.db` | SQLite file |
//! | `HTTP_PORT` | `8000` | listen port |
//! | `ENVIRONMENT` | `development` | development / staging / production |
//! | `JWT_SECRET` | dev fallback | HS256 secret, required outside development |
//! | `JWT_EXPIRATION_MINUTES` | `1440` | token lifetime |
//! | `MEDIA_DIR` | `media` | image root |
//! | `PUBLIC_URL` | `http://localhost:8000` | base for media, pagination and short links |
//! | `PAGE_SIZE` | `6` | default page size |
//! | `MAX_IMAGE_BYTES` | `5242880` | decoded image cap |
//! | `LOG_LEVEL` | `info` | default log level |
//! | `LOG_DIR` | unset | daily rolling log files when set |

use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Recipe server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path (`:memory:` for tests)
    pub database_path: String,
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: i64,
    /// Root directory for uploaded images
    pub media_dir: PathBuf,
    /// Externally visible base URL, without trailing slash
    pub public_url: String,
    pub page_size: u32,
    pub max_image_bytes: usize,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// `PAGE_SIZE` defaults to 6 and must be a whole number of at least 1
    fn parse_page_size(raw: Option<String>) -> Result<u32, BoxError> {
        let Some(raw) = raw else {
            return Ok(6);
        };
        let size: u32 = raw
            .trim()
            .parse()
            .map_err(|_| format!("PAGE_SIZE must be a positive integer, got {raw:?}"))?;
        if size < 1 {
            return Err("PAGE_SIZE must be at least 1".into());
        }
        Ok(size)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "recipes.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            media_dir: std::env::var("MEDIA_DIR")
                .unwrap_or_else(|_| "media".into())
                .into(),
            public_url: std::env::var("PUBLIC_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8000".into()),
            page_size: Self::parse_page_size(std::env::var("PAGE_SIZE").ok())?,
            max_image_bytes: std::env::var("MAX_IMAGE_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5 * 1024 * 1024),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    /// In-memory configuration for tests
    pub fn for_tests(media_dir: impl Into<PathBuf>) -> Self {
        Self {
            database_path: ":memory:".into(),
            http_port: 0,
            environment: "development".into(),
            jwt_secret: "test-secret-key-with-enough-length-000".into(),
            jwt_expiration_minutes: 60,
            media_dir: media_dir.into(),
            public_url: "http://testserver".into(),
            page_size: 6,
            max_image_bytes: 1024 * 1024,
            log_level: "debug".into(),
            log_dir: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
