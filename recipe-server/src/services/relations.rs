//! Relation manager
//!
//! Add/remove toggles over favorites, the shopping cart and subscriptions.
//! Order of checks: self-subscription, target existence, pair existence.

use serde::Serialize;
use shared::models::{AuthorCard, RecipeSummary};

use super::views;
use crate::core::AppState;
use crate::db::repository::relation::{self, RelationKind};
use crate::db::repository::{RepoError, recipe, user};
use crate::utils::{AppError, AppResult, ErrorCode};

impl RelationKind {
    /// Error when the target row does not exist
    pub const fn target_missing(&self) -> ErrorCode {
        match self {
            Self::Favorite | Self::ShoppingCart => ErrorCode::RecipeNotFound,
            Self::Subscription => ErrorCode::UserNotFound,
        }
    }

    /// Error when the pair already exists
    pub const fn already_exists(&self) -> ErrorCode {
        match self {
            Self::Favorite => ErrorCode::AlreadyFavorited,
            Self::ShoppingCart => ErrorCode::AlreadyInCart,
            Self::Subscription => ErrorCode::AlreadySubscribed,
        }
    }

    /// Error when removing a pair that does not exist
    pub const fn not_present(&self) -> ErrorCode {
        match self {
            Self::Favorite => ErrorCode::NotFavorited,
            Self::ShoppingCart => ErrorCode::NotInCart,
            Self::Subscription => ErrorCode::NotSubscribed,
        }
    }
}

/// Representation returned after a successful add
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RelationTarget {
    Recipe(RecipeSummary),
    Author(Box<AuthorCard>),
}

fn check_self(kind: RelationKind, user_id: i64, target_id: i64) -> AppResult<()> {
    if kind == RelationKind::Subscription && user_id == target_id {
        return Err(AppError::new(ErrorCode::SelfSubscription)
            .with_field_error("author", ErrorCode::SelfSubscription.message()));
    }
    Ok(())
}

async fn target_exists(state: &AppState, kind: RelationKind, target_id: i64) -> AppResult<bool> {
    let found = match kind {
        RelationKind::Favorite | RelationKind::ShoppingCart => {
            recipe::exists(&state.pool, target_id).await?
        }
        RelationKind::Subscription => user::exists(&state.pool, target_id).await?,
    };
    Ok(found)
}

pub async fn add(
    state: &AppState,
    kind: RelationKind,
    user_id: i64,
    target_id: i64,
    recipes_limit: Option<i64>,
) -> AppResult<RelationTarget> {
    check_self(kind, user_id, target_id)?;
    if !target_exists(state, kind, target_id).await? {
        return Err(AppError::new(kind.target_missing()));
    }
    if relation::exists(&state.pool, kind, user_id, target_id).await? {
        return Err(AppError::new(kind.already_exists()));
    }
    match relation::insert(&state.pool, kind, user_id, target_id).await {
        Ok(()) => {}
        // Lost a race against a concurrent insert of the same pair
        Err(RepoError::Duplicate(_)) => return Err(AppError::new(kind.already_exists())),
        Err(e) => return Err(e.into()),
    }
    tracing::info!(kind = ?kind, user_id, target_id, "Relation added");

    match kind {
        RelationKind::Favorite | RelationKind::ShoppingCart => {
            let row = recipe::find_summary(&state.pool, target_id)
                .await?
                .ok_or_else(|| AppError::new(kind.target_missing()))?;
            Ok(RelationTarget::Recipe(views::summary(state, row)))
        }
        RelationKind::Subscription => {
            let author = user::find_by_id(&state.pool, target_id)
                .await?
                .ok_or_else(|| AppError::new(kind.target_missing()))?;
            let card = views::author_card(state, &author, Some(user_id), recipes_limit).await?;
            Ok(RelationTarget::Author(Box::new(card)))
        }
    }
}

pub async fn remove(
    state: &AppState,
    kind: RelationKind,
    user_id: i64,
    target_id: i64,
) -> AppResult<()> {
    check_self(kind, user_id, target_id)?;
    if !target_exists(state, kind, target_id).await? {
        return Err(AppError::new(kind.target_missing()));
    }
    match relation::delete(&state.pool, kind, user_id, target_id).await {
        Ok(()) => {
            tracing::info!(kind = ?kind, user_id, target_id, "Relation removed");
            Ok(())
        }
        Err(RepoError::NotFound(_)) => Err(AppError::new(kind.not_present())),
        Err(e) => Err(e.into()),
    }
}
