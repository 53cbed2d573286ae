//! Data models
//!
//! Row types derive `sqlx::FromRow` behind the `db` feature. Read views are
//! assembled by the server from rows plus per-requester flags.

pub mod ingredient;
pub mod recipe;
pub mod tag;
pub mod user;

pub use ingredient::*;
pub use recipe::*;
pub use tag::*;
pub use user::*;
