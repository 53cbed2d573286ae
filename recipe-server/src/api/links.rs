//! Short link resolution

use axum::{
    Router,
    extract::State,
    response::Redirect,
    routing::get,
};

use crate::core::AppState;
use crate::db::repository::recipe;
use crate::services::short_link;
use crate::utils::extract::Path;
use crate::utils::{AppError, AppResult, ErrorCode};

pub fn router() -> Router<AppState> {
    Router::new().route("/s/{code}", get(resolve))
}

/// GET /s/{code} - redirect to the recipe
async fn resolve(State(state): State<AppState>, Path(code): Path<String>) -> AppResult<Redirect> {
    let id = short_link::decode(&code)
        .and_then(|id| i64::try_from(id).ok())
        .ok_or_else(|| AppError::new(ErrorCode::InvalidShortLink))?;
    if !recipe::exists(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::InvalidShortLink));
    }
    Ok(Redirect::temporary(&format!("/api/recipes/{id}")))
}
