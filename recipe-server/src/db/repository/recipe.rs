//! Recipe Repository
//!
//! Recipe rows, their tag links and ingredient lines. Writes that touch more
//! than one table run inside a single transaction.

use super::{RepoError, RepoResult};
use shared::models::{CartLine, IngredientAmount, Recipe, RecipeIngredient, RecipeSummary};
use shared::util::now_millis;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const COLUMNS: &str = "r.id, r.author_id, r.name, r.text, r.image, r.cooking_time, r.pub_date";

/// Validated recipe fields with the image already stored
#[derive(Debug, Clone)]
pub struct RecipeData {
    pub name: String,
    pub text: String,
    /// Media-relative image path
    pub image: String,
    pub cooking_time: i64,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Relation constraint used by list filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipFilter {
    pub user_id: i64,
    /// `true` keeps members, `false` keeps non-members
    pub member: bool,
}

/// Conjunctive recipe list filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author: Option<i64>,
    /// Tag slugs, matched with OR
    pub tags: Vec<String>,
    pub favorited: Option<MembershipFilter>,
    pub in_cart: Option<MembershipFilter>,
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &RecipeFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(author) = filter.author {
        qb.push(" AND r.author_id = ").push_bind(author);
    }
    if !filter.tags.is_empty() {
        qb.push(
            " AND r.id IN (SELECT rt.recipe_id FROM recipe_tags rt \
             JOIN tags t ON t.id = rt.tag_id WHERE t.slug IN (",
        );
        let mut separated = qb.separated(", ");
        for slug in &filter.tags {
            separated.push_bind(slug.clone());
        }
        separated.push_unseparated("))");
    }
    for (table, membership) in [
        ("favorites", filter.favorited),
        ("shopping_cart", filter.in_cart),
    ] {
        if let Some(m) = membership {
            qb.push(if m.member { " AND EXISTS" } else { " AND NOT EXISTS" });
            qb.push(format!(
                " (SELECT 1 FROM {table} x WHERE x.recipe_id = r.id AND x.user_id = "
            ));
            qb.push_bind(m.user_id).push(")");
        }
    }
}

/// Newest first
pub async fn list(
    pool: &SqlitePool,
    filter: &RecipeFilter,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Recipe>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!("SELECT {COLUMNS} FROM recipes r"));
    push_filters(&mut qb, filter);
    qb.push(" ORDER BY r.pub_date DESC, r.id DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    let recipes = qb.build_query_as::<Recipe>().fetch_all(pool).await?;
    Ok(recipes)
}

pub async fn count(pool: &SqlitePool, filter: &RecipeFilter) -> RepoResult<i64> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM recipes r");
    push_filters(&mut qb, filter);
    let count = qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    Ok(count)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Recipe>> {
    let recipe =
        sqlx::query_as::<_, Recipe>(&format!("SELECT {COLUMNS} FROM recipes r WHERE r.id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(recipe)
}

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM recipes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub async fn find_summary(pool: &SqlitePool, id: i64) -> RepoResult<Option<RecipeSummary>> {
    let summary = sqlx::query_as::<_, RecipeSummary>(
        "SELECT id, name, image, cooking_time FROM recipes WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(summary)
}

async fn replace_links(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    data: &RecipeData,
) -> RepoResult<()> {
    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;

    for tag_id in &data.tags {
        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES (?, ?)")
            .bind(recipe_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
    }
    for line in &data.ingredients {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES (?, ?, ?)",
        )
        .bind(recipe_id)
        .bind(line.id)
        .bind(line.amount)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Insert a recipe with its tags and ingredient lines; returns the new id
pub async fn create(pool: &SqlitePool, author_id: i64, data: &RecipeData) -> RepoResult<i64> {
    let mut tx = pool.begin().await?;
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO recipes (author_id, name, text, image, cooking_time, pub_date) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(author_id)
    .bind(&data.name)
    .bind(&data.text)
    .bind(&data.image)
    .bind(data.cooking_time)
    .bind(now_millis())
    .fetch_one(&mut *tx)
    .await?;
    replace_links(&mut tx, id, data).await?;
    tx.commit().await?;
    Ok(id)
}

/// Replace every field, tag and ingredient line of a recipe
pub async fn update(pool: &SqlitePool, id: i64, data: &RecipeData) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    let rows = sqlx::query(
        "UPDATE recipes SET name = ?, text = ?, image = ?, cooking_time = ? WHERE id = ?",
    )
    .bind(&data.name)
    .bind(&data.text)
    .bind(&data.image)
    .bind(data.cooking_time)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Recipe {id} not found")));
    }
    replace_links(&mut tx, id, data).await?;
    tx.commit().await?;
    Ok(())
}

/// Delete a recipe; links and relation rows cascade
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Ingredient lines of a recipe, ordered by ingredient name
pub async fn ingredients_for(pool: &SqlitePool, recipe_id: i64) -> RepoResult<Vec<RecipeIngredient>> {
    let lines = sqlx::query_as::<_, RecipeIngredient>(
        "SELECT i.id, i.name, i.measurement_unit, ri.amount FROM recipe_ingredients ri \
         JOIN ingredients i ON i.id = ri.ingredient_id \
         WHERE ri.recipe_id = ? ORDER BY i.name, i.id",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;
    Ok(lines)
}

/// Newest recipes of an author; `None` returns all of them
pub async fn summaries_by_author(
    pool: &SqlitePool,
    author_id: i64,
    limit: Option<i64>,
) -> RepoResult<Vec<RecipeSummary>> {
    let summaries = sqlx::query_as::<_, RecipeSummary>(
        "SELECT id, name, image, cooking_time FROM recipes WHERE author_id = ? \
         ORDER BY pub_date DESC, id DESC LIMIT ?",
    )
    .bind(author_id)
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await?;
    Ok(summaries)
}

pub async fn count_by_author(pool: &SqlitePool, author_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE author_id = ?")
        .bind(author_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// All ingredient lines of the recipes in a user's shopping cart
pub async fn cart_lines(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<CartLine>> {
    let lines = sqlx::query_as::<_, CartLine>(
        "SELECT i.name, i.measurement_unit, ri.amount FROM shopping_cart c \
         JOIN recipe_ingredients ri ON ri.recipe_id = c.recipe_id \
         JOIN ingredients i ON i.id = ri.ingredient_id \
         WHERE c.user_id = ?",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(lines)
}
