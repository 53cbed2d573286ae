//! Utility modules
//!
//! - `extract`: JSON, path and query extractors with JSON error bodies
//! - `logger`: tracing subscriber setup
//! - `pagination`: page/limit parsing and page envelopes
//! - `query`: multi-value query string helpers
//! - `validation`: text and account field checks

pub mod extract;
pub mod logger;
pub mod pagination;
pub mod query;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCode};
