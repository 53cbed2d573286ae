//! Authentication
//!
//! - [`JwtService`] - token issuance and validation
//! - [`CurrentUser`] / [`MaybeUser`] - request extractors
//! - [`hash_password`] / [`verify_password`] - argon2 helpers

pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::{CurrentUser, MaybeUser};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use password::{hash_password, verify_password};
