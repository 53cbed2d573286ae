//! Shared types for the recipe service
//!
//! Domain models, request payloads, read views, pagination envelopes and
//! the unified error system used by `recipe-server`.

pub mod error;
pub mod models;
pub mod query;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use query::Page;
