//! Relation Repository
//!
//! Favorites, shopping cart entries and subscriptions share one shape:
//! a `(user_id, target_id, created_at)` row, unique per pair.

use super::{RepoError, RepoResult};
use shared::models::User;
use shared::util::now_millis;
use sqlx::SqlitePool;

/// Kind of relation row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Favorite,
    ShoppingCart,
    Subscription,
}

impl RelationKind {
    pub const fn table(&self) -> &'static str {
        match self {
            Self::Favorite => "favorites",
            Self::ShoppingCart => "shopping_cart",
            Self::Subscription => "subscriptions",
        }
    }

    /// Column holding the target id
    pub const fn target_column(&self) -> &'static str {
        match self {
            Self::Favorite | Self::ShoppingCart => "recipe_id",
            Self::Subscription => "author_id",
        }
    }
}

pub async fn exists(
    pool: &SqlitePool,
    kind: RelationKind,
    user_id: i64,
    target_id: i64,
) -> RepoResult<bool> {
    let sql = format!(
        "SELECT 1 FROM {} WHERE user_id = ? AND {} = ?",
        kind.table(),
        kind.target_column()
    );
    let found: Option<i64> = sqlx::query_scalar(&sql)
        .bind(user_id)
        .bind(target_id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Insert a relation row; an existing pair is a `Duplicate`
pub async fn insert(
    pool: &SqlitePool,
    kind: RelationKind,
    user_id: i64,
    target_id: i64,
) -> RepoResult<()> {
    let sql = format!(
        "INSERT INTO {} (user_id, {}, created_at) VALUES (?, ?, ?)",
        kind.table(),
        kind.target_column()
    );
    sqlx::query(&sql)
        .bind(user_id)
        .bind(target_id)
        .bind(now_millis())
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a relation row; `NotFound` when the pair does not exist
pub async fn delete(
    pool: &SqlitePool,
    kind: RelationKind,
    user_id: i64,
    target_id: i64,
) -> RepoResult<()> {
    let sql = format!(
        "DELETE FROM {} WHERE user_id = ? AND {} = ?",
        kind.table(),
        kind.target_column()
    );
    let rows = sqlx::query(&sql)
        .bind(user_id)
        .bind(target_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "No {} row for user {user_id} and target {target_id}",
            kind.table()
        )));
    }
    Ok(())
}

/// Authors followed by `user_id`, ordered by username
pub async fn subscribed_authors(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<User>> {
    let authors = sqlx::query_as::<_, User>(
        "SELECT u.id, u.username, u.email, u.first_name, u.last_name, u.password_hash, \
         u.avatar, u.created_at FROM users u \
         JOIN subscriptions s ON s.author_id = u.id \
         WHERE s.user_id = ? ORDER BY u.username LIMIT ? OFFSET ?",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(authors)
}

pub async fn count_subscriptions(pool: &SqlitePool, user_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
