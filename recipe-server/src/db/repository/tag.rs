//! Tag Repository

use super::{RepoError, RepoResult};
use shared::models::{DEFAULT_TAG_COLOR, Tag, TagCreate};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// Tags ordered by name, optionally filtered by a case-insensitive substring
pub async fn find_all(pool: &SqlitePool, name: Option<&str>) -> RepoResult<Vec<Tag>> {
    let tags = match name {
        Some(name) => {
            sqlx::query_as::<_, Tag>(
                "SELECT id, name, slug, color FROM tags \
                 WHERE lower(name) LIKE '%' || lower(?) || '%' ORDER BY name",
            )
            .bind(name)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Tag>("SELECT id, name, slug, color FROM tags ORDER BY name")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(tags)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>("SELECT id, name, slug, color FROM tags WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(tag)
}

pub async fn create(pool: &SqlitePool, data: TagCreate) -> RepoResult<Tag> {
    let color = data.color.as_deref().unwrap_or(DEFAULT_TAG_COLOR);
    let id: i64 =
        sqlx::query_scalar("INSERT INTO tags (name, slug, color) VALUES (?, ?, ?) RETURNING id")
            .bind(&data.name)
            .bind(&data.slug)
            .bind(color)
            .fetch_one(pool)
            .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create tag".into()))
}

/// The subset of `ids` that exist
pub async fn existing_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<i64>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT id FROM tags WHERE id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    let found = qb.build_query_scalar::<i64>().fetch_all(pool).await?;
    Ok(found)
}

/// Tags linked to a recipe, ordered by name
pub async fn find_for_recipe(pool: &SqlitePool, recipe_id: i64) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT t.id, t.name, t.slug, t.color FROM tags t \
         JOIN recipe_tags rt ON rt.tag_id = t.id \
         WHERE rt.recipe_id = ? ORDER BY t.name",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;
    Ok(tags)
}
