//! Recipe API Handlers

use axum::{
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use shared::Page;
use shared::models::{RecipeRead, RecipeWrite, ShortLink};

use crate::auth::{CurrentUser, MaybeUser};
use crate::core::AppState;
use crate::db::repository::recipe::{self, MembershipFilter, RecipeData, RecipeFilter};
use crate::db::repository::relation::RelationKind;
use crate::services::validation::{self, ValidRecipe};
use crate::services::{MediaKind, RelationTarget, relations, shopping_list, short_link, views};
use crate::utils::extract::{Json, Path, Query};
use crate::utils::pagination::PageParams;
use crate::utils::query::{self, QueryPairs};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Build list filters from the query string
///
/// Membership flags only apply to authenticated requesters.
fn parse_filter(pairs: &QueryPairs, viewer: Option<i64>) -> AppResult<RecipeFilter> {
    let author = query::get_i64(pairs, "author")?;
    let tags = query::get_all(pairs, "tags")
        .into_iter()
        .map(str::to_string)
        .collect();
    let is_favorited = query::get_bool(pairs, "is_favorited")?;
    let is_in_cart = query::get_bool(pairs, "is_in_shopping_cart")?;

    let membership = |flag: Option<bool>| {
        viewer
            .zip(flag)
            .map(|(user_id, member)| MembershipFilter { user_id, member })
    };

    Ok(RecipeFilter {
        author,
        tags,
        favorited: membership(is_favorited),
        in_cart: membership(is_in_cart),
    })
}

async fn load_own_recipe(
    state: &AppState,
    id: i64,
    user: &CurrentUser,
) -> AppResult<shared::models::Recipe> {
    let row = recipe::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RecipeNotFound))?;
    if row.author_id != user.id {
        return Err(AppError::new(ErrorCode::NotAuthor));
    }
    Ok(row)
}

/// Store the validated image and turn the payload into repository data
async fn into_data(state: &AppState, valid: ValidRecipe) -> AppResult<RecipeData> {
    let image = state.media.save(MediaKind::Recipe, &valid.image).await?;
    Ok(RecipeData {
        name: valid.name,
        text: valid.text,
        image,
        cooking_time: valid.cooking_time,
        tags: valid.tags,
        ingredients: valid.ingredients,
    })
}

/// GET /api/recipes - filtered, paginated list
pub async fn list(
    State(state): State<AppState>,
    user: MaybeUser,
    OriginalUri(uri): OriginalUri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Page<RecipeRead>>> {
    let viewer = user.id();
    let filter = parse_filter(&pairs, viewer)?;
    let params = PageParams::from_query(&pairs, state.config.page_size)?;

    let count = recipe::count(&state.pool, &filter).await?;
    let rows = recipe::list(&state.pool, &filter, params.limit(), params.offset()).await?;

    let mut results = Vec::with_capacity(rows.len());
    for row in rows {
        results.push(views::recipe_read(&state, row, viewer).await?);
    }

    let base = state.absolute_url(uri.path());
    Ok(Json(params.into_page(count, results, &base, &pairs)))
}

/// POST /api/recipes - create a recipe
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<RecipeWrite>,
) -> AppResult<(StatusCode, Json<RecipeRead>)> {
    let valid = validation::validate_recipe(&state.pool, &state.media, &payload).await?;
    let data = into_data(&state, valid).await?;

    let id = match recipe::create(&state.pool, user.id, &data).await {
        Ok(id) => id,
        Err(e) => {
            state.media.remove(&data.image).await;
            return Err(e.into());
        }
    };
    tracing::info!(recipe_id = id, author_id = user.id, "Recipe created");

    let row = recipe::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RecipeNotFound))?;
    let read = views::recipe_read(&state, row, Some(user.id)).await?;
    Ok((StatusCode::CREATED, Json(read)))
}

/// GET /api/recipes/{id} - single recipe
pub async fn get_by_id(
    State(state): State<AppState>,
    user: MaybeUser,
    Path(id): Path<i64>,
) -> AppResult<Json<RecipeRead>> {
    let row = recipe::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RecipeNotFound))?;
    Ok(Json(views::recipe_read(&state, row, user.id()).await?))
}

/// PATCH /api/recipes/{id} - replace fields, tags and ingredients (author only)
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RecipeWrite>,
) -> AppResult<Json<RecipeRead>> {
    let existing = load_own_recipe(&state, id, &user).await?;
    let valid = validation::validate_recipe(&state.pool, &state.media, &payload).await?;
    let data = into_data(&state, valid).await?;

    if let Err(e) = recipe::update(&state.pool, id, &data).await {
        state.media.remove(&data.image).await;
        return Err(e.into());
    }
    state.media.remove(&existing.image).await;
    tracing::info!(recipe_id = id, author_id = user.id, "Recipe updated");

    let row = recipe::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RecipeNotFound))?;
    Ok(Json(views::recipe_read(&state, row, Some(user.id)).await?))
}

/// DELETE /api/recipes/{id} - delete a recipe (author only)
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let existing = load_own_recipe(&state, id, &user).await?;
    if !recipe::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::RecipeNotFound));
    }
    state.media.remove(&existing.image).await;
    tracing::info!(recipe_id = id, author_id = user.id, "Recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/recipes/{id}/favorite
pub async fn add_favorite(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<RelationTarget>)> {
    let target = relations::add(&state, RelationKind::Favorite, user.id, id, None).await?;
    Ok((StatusCode::CREATED, Json(target)))
}

/// DELETE /api/recipes/{id}/favorite
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    relations::remove(&state, RelationKind::Favorite, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/recipes/{id}/shopping_cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<RelationTarget>)> {
    let target = relations::add(&state, RelationKind::ShoppingCart, user.id, id, None).await?;
    Ok((StatusCode::CREATED, Json(target)))
}

/// DELETE /api/recipes/{id}/shopping_cart
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    relations::remove(&state, RelationKind::ShoppingCart, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/recipes/{id}/get-link
pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ShortLink>> {
    if !recipe::exists(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::RecipeNotFound));
    }
    Ok(Json(ShortLink {
        short_link: state.absolute_url(&short_link::path_for(id)),
    }))
}

/// GET /api/recipes/download_shopping_cart - aggregated list as a text file
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let lines = recipe::cart_lines(&state.pool, user.id).await?;
    let body = shopping_list::render(&lines);
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", shopping_list::FILE_NAME),
            ),
        ],
        body,
    ))
}
