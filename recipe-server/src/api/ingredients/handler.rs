//! Ingredient API Handlers

use axum::extract::State;
use serde::Deserialize;

use crate::core::AppState;
use crate::db::repository::ingredient;
use crate::utils::extract::{Json, Path, Query};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::Ingredient;

#[derive(Debug, Default, Deserialize)]
pub struct IngredientQuery {
    /// Case-insensitive name prefix
    pub name: Option<String>,
}

/// GET /api/ingredients - all ingredients, unpaginated
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<IngredientQuery>,
) -> AppResult<Json<Vec<Ingredient>>> {
    let name = query.name.as_deref().filter(|n| !n.is_empty());
    let ingredients = ingredient::find_all(&state.pool, name).await?;
    Ok(Json(ingredients))
}

/// GET /api/ingredients/{id} - single ingredient
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Ingredient>> {
    let found = ingredient::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::IngredientNotFound))?;
    Ok(Json(found))
}
