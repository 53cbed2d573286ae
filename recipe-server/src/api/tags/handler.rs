//! Tag API Handlers

use axum::extract::State;
use serde::Deserialize;

use crate::core::AppState;
use crate::db::repository::tag;
use crate::utils::extract::{Json, Path, Query};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::Tag;

#[derive(Debug, Default, Deserialize)]
pub struct TagQuery {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
}

/// GET /api/tags - all tags, unpaginated
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TagQuery>,
) -> AppResult<Json<Vec<Tag>>> {
    let name = query.name.as_deref().filter(|n| !n.is_empty());
    let tags = tag::find_all(&state.pool, name).await?;
    Ok(Json(tags))
}

/// GET /api/tags/{id} - single tag
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Tag>> {
    let t = tag::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TagNotFound))?;
    Ok(Json(t))
}
