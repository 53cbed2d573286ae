//! Recipe Model

use super::tag::Tag;
use super::user::UserRead;
use serde::{Deserialize, Serialize};

/// Lower bound for cooking time and ingredient amounts
pub const MIN_AMOUNT: i64 = 1;
/// Upper bound for cooking time and ingredient amounts
pub const MAX_AMOUNT: i64 = 32_000;
/// Maximum recipe name length (characters)
pub const MAX_RECIPE_NAME_LEN: usize = 200;

/// Recipe entity (recipes table)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Recipe {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub text: String,
    /// Media-relative path
    pub image: String,
    pub cooking_time: i64,
    pub pub_date: i64,
}

/// Ingredient line as sent by clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAmount {
    pub id: i64,
    pub amount: i64,
}

/// Create/update recipe payload
///
/// Every field defaults so that a missing field is reported as a
/// field-scoped validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeWrite {
    pub name: String,
    pub text: String,
    /// Data URL (`data:image/<ext>;base64,...`)
    pub image: Option<String>,
    pub cooking_time: i64,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Ingredient line joined with its ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RecipeIngredient {
    /// Ingredient id
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Recipe read view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRead {
    pub id: i64,
    pub tags: Vec<Tag>,
    pub author: UserRead,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    /// Absolute image URL
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
}

/// Short recipe representation (favorites, cart, author cards)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    /// Media-relative path in rows, absolute URL once served
    pub image: String,
    pub cooking_time: i64,
}

/// One ingredient line of a recipe in the requester's cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Short link response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortLink {
    #[serde(rename = "short-link")]
    pub short_link: String,
}
