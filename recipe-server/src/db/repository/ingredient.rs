//! Ingredient Repository

use super::{RepoError, RepoResult};
use shared::models::{Ingredient, IngredientCreate};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// Ingredients ordered by name, optionally filtered by a case-insensitive prefix
pub async fn find_all(pool: &SqlitePool, name: Option<&str>) -> RepoResult<Vec<Ingredient>> {
    let ingredients = match name {
        Some(prefix) => {
            sqlx::query_as::<_, Ingredient>(
                "SELECT id, name, measurement_unit FROM ingredients \
                 WHERE lower(name) LIKE lower(?) || '%' ORDER BY name, id",
            )
            .bind(prefix)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Ingredient>(
                "SELECT id, name, measurement_unit FROM ingredients ORDER BY name, id",
            )
            .fetch_all(pool)
            .await?
        }
    };
    Ok(ingredients)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Ingredient>> {
    let ingredient = sqlx::query_as::<_, Ingredient>(
        "SELECT id, name, measurement_unit FROM ingredients WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(ingredient)
}

pub async fn create(pool: &SqlitePool, data: IngredientCreate) -> RepoResult<Ingredient> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO ingredients (name, measurement_unit) VALUES (?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.measurement_unit)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create ingredient".into()))
}

/// The subset of `ids` that exist
pub async fn existing_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<i64>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id FROM ingredients WHERE id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    let found = qb.build_query_scalar::<i64>().fetch_all(pool).await?;
    Ok(found)
}
