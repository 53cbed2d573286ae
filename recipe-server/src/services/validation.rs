//! Recipe payload validation
//!
//! Every independent check runs and all messages are collected per field.
//! Shape checks come first; existence checks hit the database only for a
//! list that passed its own shape checks. Nothing is written here.

use std::collections::HashSet;

use shared::error::FieldErrors;
use shared::models::{IngredientAmount, MAX_AMOUNT, MAX_RECIPE_NAME_LEN, MIN_AMOUNT, RecipeWrite};
use sqlx::SqlitePool;

use super::media::{DecodedImage, MediaStore};
use crate::db::repository::{ingredient, tag};
use crate::utils::validation::check_required_text;
use crate::utils::{AppResult, ErrorCode};

/// A payload that passed validation; the image is decoded but not stored
#[derive(Debug, Clone)]
pub struct ValidRecipe {
    pub name: String,
    pub text: String,
    pub image: DecodedImage,
    pub cooking_time: i64,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientAmount>,
}

fn in_range(value: i64) -> bool {
    (MIN_AMOUNT..=MAX_AMOUNT).contains(&value)
}

/// Checks that need no database access
fn check_shape(
    payload: &RecipeWrite,
    media: &MediaStore,
    errors: &mut FieldErrors,
) -> Option<DecodedImage> {
    if payload.ingredients.is_empty() {
        errors.add("ingredients", "Add at least one ingredient");
    } else {
        let mut seen = HashSet::new();
        for line in &payload.ingredients {
            if !seen.insert(line.id) {
                errors.add_with_code(
                    ErrorCode::DuplicateIngredient,
                    "ingredients",
                    format!("Ingredient {} is listed more than once", line.id),
                );
            }
            if !in_range(line.amount) {
                errors.add(
                    "ingredients",
                    format!(
                        "Amount of ingredient {} must be between {MIN_AMOUNT} and {MAX_AMOUNT}",
                        line.id
                    ),
                );
            }
        }
    }

    if payload.tags.is_empty() {
        errors.add("tags", "Add at least one tag");
    } else {
        let mut seen = HashSet::new();
        for id in &payload.tags {
            if !seen.insert(*id) {
                errors.add_with_code(
                    ErrorCode::DuplicateTag,
                    "tags",
                    format!("Tag {id} is listed more than once"),
                );
            }
        }
    }

    if !in_range(payload.cooking_time) {
        errors.add(
            "cooking_time",
            format!("Cooking time must be between {MIN_AMOUNT} and {MAX_AMOUNT}"),
        );
    }

    check_required_text(errors, &payload.name, "name", MAX_RECIPE_NAME_LEN);
    if payload.text.trim().is_empty() {
        errors.add("text", "text must not be empty");
    }

    match payload.image.as_deref().map(str::trim) {
        None | Some("") => {
            errors.add("image", "An image is required");
            None
        }
        Some(data_url) => match media.decode(data_url) {
            Ok(image) => Some(image),
            Err(e) => {
                errors.add("image", e.message);
                None
            }
        },
    }
}

/// Validate a create/update payload
pub async fn validate_recipe(
    pool: &SqlitePool,
    media: &MediaStore,
    payload: &RecipeWrite,
) -> AppResult<ValidRecipe> {
    let mut errors = FieldErrors::new();
    let image = check_shape(payload, media, &mut errors);

    if !errors.has("ingredients") {
        let ids: Vec<i64> = payload.ingredients.iter().map(|l| l.id).collect();
        let found: HashSet<i64> = ingredient::existing_ids(pool, &ids)
            .await?
            .into_iter()
            .collect();
        for id in ids.iter().filter(|id| !found.contains(id)) {
            errors.add("ingredients", format!("Ingredient {id} does not exist"));
        }
    }

    if !errors.has("tags") {
        let found: HashSet<i64> = tag::existing_ids(pool, &payload.tags)
            .await?
            .into_iter()
            .collect();
        for id in payload.tags.iter().filter(|id| !found.contains(id)) {
            errors.add("tags", format!("Tag {id} does not exist"));
        }
    }

    errors.into_result()?;

    // into_result() only succeeds when every check passed, including the image
    let Some(image) = image else {
        return Err(crate::utils::AppError::internal("Validated recipe without image"));
    };

    Ok(ValidRecipe {
        name: payload.name.trim().to_string(),
        text: payload.text.clone(),
        image,
        cooking_time: payload.cooking_time,
        tags: payload.tags.clone(),
        ingredients: payload.ingredients.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::media::tests::png_data_url;

    fn media(dir: &std::path::Path) -> MediaStore {
        MediaStore::new(dir.to_path_buf(), "http://testserver".into(), 1024 * 1024)
    }

    fn valid_payload() -> RecipeWrite {
        RecipeWrite {
            name: "Pancakes".into(),
            text: "Mix and fry".into(),
            image: Some(png_data_url()),
            cooking_time: 20,
            tags: vec![1, 2],
            ingredients: vec![
                IngredientAmount { id: 1, amount: 200 },
                IngredientAmount { id: 2, amount: 1 },
            ],
        }
    }

    fn shape_errors(payload: &RecipeWrite) -> FieldErrors {
        let dir = tempfile::tempdir().unwrap();
        let mut errors = FieldErrors::new();
        check_shape(payload, &media(dir.path()), &mut errors);
        errors
    }

    #[test]
    fn test_valid_shape() {
        assert!(shape_errors(&valid_payload()).is_empty());
    }

    #[test]
    fn test_duplicate_tag() {
        let mut payload = valid_payload();
        payload.tags = vec![1, 1];
        let err = shape_errors(&payload).into_result().unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateTag);
        assert!(err.details.unwrap().contains_key("tags"));
    }

    #[test]
    fn test_duplicate_ingredient() {
        let mut payload = valid_payload();
        payload.ingredients = vec![
            IngredientAmount { id: 3, amount: 1 },
            IngredientAmount { id: 3, amount: 5 },
        ];
        let err = shape_errors(&payload).into_result().unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateIngredient);
    }

    #[test]
    fn test_amount_bounds() {
        for amount in [0, -5, 32_001] {
            let mut payload = valid_payload();
            payload.ingredients = vec![IngredientAmount { id: 1, amount }];
            assert!(shape_errors(&payload).has("ingredients"), "amount {amount}");
        }
        let mut payload = valid_payload();
        payload.ingredients = vec![IngredientAmount { id: 1, amount: 32_000 }];
        assert!(shape_errors(&payload).is_empty());
    }

    #[test]
    fn test_cooking_time_bounds() {
        let mut payload = valid_payload();
        payload.cooking_time = 0;
        assert!(shape_errors(&payload).has("cooking_time"));
        payload.cooking_time = 32_001;
        assert!(shape_errors(&payload).has("cooking_time"));
    }

    #[test]
    fn test_missing_image_and_empty_lists() {
        let payload = RecipeWrite {
            name: "Soup".into(),
            text: "Boil".into(),
            cooking_time: 10,
            ..Default::default()
        };
        let errors = shape_errors(&payload);
        assert!(errors.has("image"));
        assert!(errors.has("tags"));
        assert!(errors.has("ingredients"));

        let err = errors.into_result().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Add at least one ingredient");
    }

    #[test]
    fn test_name_and_text() {
        let mut payload = valid_payload();
        payload.name = "x".repeat(MAX_RECIPE_NAME_LEN + 1);
        payload.text = "  ".into();
        let errors = shape_errors(&payload);
        assert!(errors.has("name"));
        assert!(errors.has("text"));
    }

    #[test]
    fn test_broken_image() {
        let mut payload = valid_payload();
        payload.image = Some("data:image/png;base64,aGVsbG8=".into());
        assert!(shape_errors(&payload).has("image"));
    }
}
