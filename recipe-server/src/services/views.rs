//! Read-view assembly
//!
//! Turns rows into the JSON views clients see: absolute media URLs and
//! per-requester flags (`is_subscribed`, `is_favorited`, `is_in_shopping_cart`).

use shared::models::{AuthorCard, Recipe, RecipeRead, RecipeSummary, User, UserRead};

use crate::core::AppState;
use crate::db::repository::relation::{self, RelationKind};
use crate::db::repository::{recipe, tag, user};
use crate::utils::{AppError, AppResult};

async fn has_relation(
    state: &AppState,
    kind: RelationKind,
    viewer: Option<i64>,
    target_id: i64,
) -> AppResult<bool> {
    match viewer {
        Some(viewer_id) => Ok(relation::exists(&state.pool, kind, viewer_id, target_id).await?),
        None => Ok(false),
    }
}

pub async fn user_read(state: &AppState, user: &User, viewer: Option<i64>) -> AppResult<UserRead> {
    let is_subscribed = has_relation(state, RelationKind::Subscription, viewer, user.id).await?;
    Ok(UserRead {
        id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
        is_subscribed,
        avatar: user.avatar.as_deref().map(|p| state.media.url(p)),
    })
}

/// Short recipe view with an absolute image URL
pub fn summary(state: &AppState, mut row: RecipeSummary) -> RecipeSummary {
    row.image = state.media.url(&row.image);
    row
}

/// Profile plus up to `recipes_limit` newest recipes
pub async fn author_card(
    state: &AppState,
    author: &User,
    viewer: Option<i64>,
    recipes_limit: Option<i64>,
) -> AppResult<AuthorCard> {
    let user = user_read(state, author, viewer).await?;
    let recipes = recipe::summaries_by_author(&state.pool, author.id, recipes_limit)
        .await?
        .into_iter()
        .map(|r| summary(state, r))
        .collect();
    let recipes_count = recipe::count_by_author(&state.pool, author.id).await?;
    Ok(AuthorCard {
        user,
        recipes,
        recipes_count,
    })
}

pub async fn recipe_read(
    state: &AppState,
    row: Recipe,
    viewer: Option<i64>,
) -> AppResult<RecipeRead> {
    let author = user::find_by_id(&state.pool, row.author_id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Recipe {} has no author", row.id)))?;
    let author = user_read(state, &author, viewer).await?;
    let tags = tag::find_for_recipe(&state.pool, row.id).await?;
    let ingredients = recipe::ingredients_for(&state.pool, row.id).await?;
    let is_favorited = has_relation(state, RelationKind::Favorite, viewer, row.id).await?;
    let is_in_shopping_cart =
        has_relation(state, RelationKind::ShoppingCart, viewer, row.id).await?;

    Ok(RecipeRead {
        id: row.id,
        tags,
        author,
        ingredients,
        is_favorited,
        is_in_shopping_cart,
        name: row.name,
        image: state.media.url(&row.image),
        text: row.text,
        cooking_time: row.cooking_time,
    })
}
