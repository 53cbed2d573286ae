//! User Repository

use super::{RepoError, RepoResult};
use shared::models::User;
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, username, email, first_name, last_name, password_hash, avatar, created_at";

/// Validated registration data with the password already hashed
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_hash: &'a str,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Case-insensitive email lookup
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM users WHERE email = ? COLLATE NOCASE LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub async fn username_taken(pool: &SqlitePool, username: &str) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub async fn email_taken(pool: &SqlitePool, email: &str) -> RepoResult<bool> {
    Ok(find_by_email(pool, email).await?.is_some())
}

pub async fn create(pool: &SqlitePool, data: NewUser<'_>) -> RepoResult<User> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, email, first_name, last_name, password_hash, created_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.username)
    .bind(data.email)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(data.password_hash)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Users ordered by username
pub async fn list(pool: &SqlitePool, limit: i64, offset: i64) -> RepoResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM users ORDER BY username LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(users)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn update_password(pool: &SqlitePool, id: i64, password_hash: &str) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

/// Set or clear the avatar path; returns the previous path
pub async fn set_avatar(
    pool: &SqlitePool,
    id: i64,
    avatar: Option<&str>,
) -> RepoResult<Option<String>> {
    let previous: Option<Option<String>> =
        sqlx::query_scalar("SELECT avatar FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    let Some(previous) = previous else {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    };
    sqlx::query("UPDATE users SET avatar = ? WHERE id = ?")
        .bind(avatar)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(previous)
}
