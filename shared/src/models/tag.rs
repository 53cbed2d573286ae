//! Tag Model

use serde::{Deserialize, Serialize};

/// Default tag color
pub const DEFAULT_TAG_COLOR: &str = "#FF0000";

/// Tag entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
    /// Hex color, `#RRGGBB`
    pub color: String,
}

/// Create tag payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCreate {
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
}
