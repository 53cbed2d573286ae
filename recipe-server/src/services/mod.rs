//! Domain services
//!
//! - `validation`: recipe payload checks
//! - `relations`: favorite / cart / subscription toggles
//! - `shopping_list`: cart aggregation and rendering
//! - `media`: image decoding and storage
//! - `short_link`: base-36 recipe codes
//! - `views`: read-view assembly

pub mod media;
pub mod relations;
pub mod short_link;
pub mod shopping_list;
pub mod validation;
pub mod views;

pub use media::{MediaKind, MediaStore};
pub use relations::RelationTarget;
