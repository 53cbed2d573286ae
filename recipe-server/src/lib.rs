//! recipe-server library
//!
//! The binary in `main.rs` wires these modules together; integration tests
//! drive [`api::build_app`] directly.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use crate::core::{AppState, Config};
pub use crate::utils::{AppError, AppResult};
