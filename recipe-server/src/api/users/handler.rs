//! User API Handlers

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
};

use shared::Page;
use shared::error::FieldErrors;
use shared::models::{
    AuthorCard, AvatarResponse, AvatarUpload, SetPassword, User, UserCreate, UserCreated,
    UserRead,
};

use crate::auth::{CurrentUser, MaybeUser, hash_password, verify_password};
use crate::core::AppState;
use crate::db::repository::relation::{self, RelationKind};
use crate::db::repository::{RepoError, user};
use crate::services::{MediaKind, RelationTarget, relations, views};
use crate::utils::extract::{Json, Path, Query};
use crate::utils::pagination::PageParams;
use crate::utils::query::{self, QueryPairs};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_PASSWORD_LEN, MAX_PERSON_NAME_LEN, MIN_PASSWORD_LEN, check_required_text,
    is_valid_email, is_valid_username,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn check_password(errors: &mut FieldErrors, field: &str, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add_with_code(
            ErrorCode::PasswordTooShort,
            field,
            ErrorCode::PasswordTooShort.message(),
        );
    } else if password.len() > MAX_PASSWORD_LEN {
        errors.add(field, format!("Password is too long (max {MAX_PASSWORD_LEN})"));
    }
}

fn check_registration(payload: &UserCreate) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    if !is_valid_email(&payload.email) || payload.email.len() > MAX_EMAIL_LEN {
        errors.add("email", "Enter a valid email address");
    }
    if !is_valid_username(&payload.username) {
        errors.add_with_code(
            ErrorCode::InvalidUsername,
            "username",
            "Username must start with a letter, use letters, digits and . _ - only, and not be 'me'",
        );
    }
    check_required_text(&mut errors, &payload.first_name, "first_name", MAX_PERSON_NAME_LEN);
    check_required_text(&mut errors, &payload.last_name, "last_name", MAX_PERSON_NAME_LEN);
    check_password(&mut errors, "password", &payload.password);
    errors.into_result()
}

/// `recipes_limit` query parameter; absent means unbounded
fn recipes_limit(pairs: &QueryPairs) -> AppResult<Option<i64>> {
    match query::get_i64(pairs, "recipes_limit")? {
        Some(n) if n < 0 => Err(AppError::validation("recipes_limit must not be negative")
            .with_field_error("recipes_limit", "Ensure this value is greater than or equal to 0")),
        other => Ok(other),
    }
}

async fn load_user(state: &AppState, id: i64) -> AppResult<User> {
    user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))
}

/// The requester's own row; a token for a deleted account is rejected
async fn load_self(state: &AppState, current: &CurrentUser) -> AppResult<User> {
    user::find_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(AppError::not_authenticated)
}

/// POST /api/users - register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<UserCreated>)> {
    check_registration(&payload)?;

    if user::username_taken(&state.pool, &payload.username).await? {
        return Err(AppError::new(ErrorCode::UsernameTaken)
            .with_field_error("username", ErrorCode::UsernameTaken.message()));
    }
    if user::email_taken(&state.pool, &payload.email).await? {
        return Err(AppError::new(ErrorCode::EmailTaken)
            .with_field_error("email", ErrorCode::EmailTaken.message()));
    }

    let password_hash = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let created = user::create(
        &state.pool,
        user::NewUser {
            email: payload.email.trim(),
            username: &payload.username,
            first_name: payload.first_name.trim(),
            last_name: payload.last_name.trim(),
            password_hash: &password_hash,
        },
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::conflict("A user with that username or email already exists"),
        other => other.into(),
    })?;

    tracing::info!(user_id = created.id, username = %created.username, "User registered");
    Ok((StatusCode::CREATED, Json(UserCreated::from(&created))))
}

/// GET /api/users - paginated profiles
pub async fn list(
    State(state): State<AppState>,
    viewer: MaybeUser,
    OriginalUri(uri): OriginalUri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Page<UserRead>>> {
    let params = PageParams::from_query(&pairs, state.config.page_size)?;
    let count = user::count(&state.pool).await?;
    let rows = user::list(&state.pool, params.limit(), params.offset()).await?;

    let mut results = Vec::with_capacity(rows.len());
    for row in &rows {
        results.push(views::user_read(&state, row, viewer.id()).await?);
    }
    let base = state.absolute_url(uri.path());
    Ok(Json(params.into_page(count, results, &base, &pairs)))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(id): Path<i64>,
) -> AppResult<Json<UserRead>> {
    let found = load_user(&state, id).await?;
    Ok(Json(views::user_read(&state, &found, viewer.id()).await?))
}

/// GET /api/users/me
pub async fn me(State(state): State<AppState>, current: CurrentUser) -> AppResult<Json<UserRead>> {
    let found = load_self(&state, &current).await?;
    Ok(Json(views::user_read(&state, &found, Some(current.id)).await?))
}

/// POST /api/users/set_password
pub async fn set_password(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<SetPassword>,
) -> AppResult<StatusCode> {
    let found = load_self(&state, &current).await?;
    if !verify_password(&payload.current_password, &found.password_hash) {
        return Err(AppError::new(ErrorCode::WrongPassword)
            .with_field_error("current_password", ErrorCode::WrongPassword.message()));
    }
    let mut errors = FieldErrors::new();
    check_password(&mut errors, "new_password", &payload.new_password);
    errors.into_result()?;

    let password_hash = hash_password(&payload.new_password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
    user::update_password(&state.pool, current.id, &password_hash).await?;
    tracing::info!(user_id = current.id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/me/avatar
pub async fn get_avatar(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<AvatarResponse>> {
    let found = load_self(&state, &current).await?;
    Ok(Json(AvatarResponse {
        avatar: found.avatar.as_deref().map(|p| state.media.url(p)),
    }))
}

/// PUT /api/users/me/avatar - replace the avatar with a data URL image
pub async fn set_avatar(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<AvatarUpload>,
) -> AppResult<Json<AvatarResponse>> {
    let data_url = payload
        .avatar
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::RequiredField, "avatar is required")
                .with_field_error("avatar", "This field is required")
        })?;
    let image = state.media.decode(data_url).map_err(|e| {
        let message = e.message.clone();
        e.with_field_error("avatar", message)
    })?;
    let stored = state.media.save(MediaKind::Avatar, &image).await?;

    let previous = match user::set_avatar(&state.pool, current.id, Some(&stored)).await {
        Ok(previous) => previous,
        Err(e) => {
            state.media.remove(&stored).await;
            return Err(e.into());
        }
    };
    if let Some(old) = previous {
        state.media.remove(&old).await;
    }
    tracing::info!(user_id = current.id, "Avatar updated");
    Ok(Json(AvatarResponse {
        avatar: Some(state.media.url(&stored)),
    }))
}

/// DELETE /api/users/me/avatar
pub async fn delete_avatar(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<StatusCode> {
    if let Some(old) = user::set_avatar(&state.pool, current.id, None).await? {
        state.media.remove(&old).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/subscriptions - authors the requester follows
pub async fn subscriptions(
    State(state): State<AppState>,
    current: CurrentUser,
    OriginalUri(uri): OriginalUri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Page<AuthorCard>>> {
    let params = PageParams::from_query(&pairs, state.config.page_size)?;
    let limit = recipes_limit(&pairs)?;
    let count = relation::count_subscriptions(&state.pool, current.id).await?;
    let authors =
        relation::subscribed_authors(&state.pool, current.id, params.limit(), params.offset())
            .await?;

    let mut results = Vec::with_capacity(authors.len());
    for author in &authors {
        results.push(views::author_card(&state, author, Some(current.id), limit).await?);
    }
    let base = state.absolute_url(uri.path());
    Ok(Json(params.into_page(count, results, &base, &pairs)))
}

/// GET /api/users/{id}/subscribe - author card
pub async fn subscription_card(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<AuthorCard>> {
    let limit = recipes_limit(&pairs)?;
    let author = load_user(&state, id).await?;
    Ok(Json(
        views::author_card(&state, &author, Some(current.id), limit).await?,
    ))
}

/// POST /api/users/{id}/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<(StatusCode, Json<RelationTarget>)> {
    let limit = recipes_limit(&pairs)?;
    let target = relations::add(&state, RelationKind::Subscription, current.id, id, limit).await?;
    Ok((StatusCode::CREATED, Json(target)))
}

/// DELETE /api/users/{id}/subscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    relations::remove(&state, RelationKind::Subscription, current.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
