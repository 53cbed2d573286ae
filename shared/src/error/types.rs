//! Error types and API response structures

use super::codes::ErrorCode;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the service, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (field-level errors, context)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Append a message to the list kept under `field`
    pub fn with_field_error(mut self, field: &str, message: impl Into<String>) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        let entry = details
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(list) = entry {
            list.push(Value::String(message.into()));
        }
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a conflict error (reported as 400)
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    /// Create an invalid token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Create a token expired error
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }
}

/// Field-scoped validation messages, collected before being turned into an [`AppError`]
///
/// Fields keep insertion order for the top-level message: the first
/// recorded violation becomes the error message.
#[derive(Debug, Default, Clone)]
pub struct FieldErrors {
    first: Option<(ErrorCode, String)>,
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation with the generic validation code
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.add_with_code(ErrorCode::ValidationFailed, field, message);
    }

    /// Record a violation with a specific error code
    pub fn add_with_code(&mut self, code: ErrorCode, field: &str, message: impl Into<String>) {
        let message = message.into();
        if self.first.is_none() {
            self.first = Some((code, message.clone()));
        }
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether any violation was recorded for `field`
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// `Ok(())` when nothing was recorded, otherwise the aggregated error
    pub fn into_result(self) -> Result<(), AppError> {
        let Some((code, message)) = self.first else {
            return Ok(());
        };
        let mut err = AppError::with_message(code, message);
        for (field, messages) in self.fields {
            for msg in messages {
                err = err.with_field_error(&field, msg);
            }
        }
        Err(err)
    }
}

/// Error body returned by every failing endpoint
///
/// - `code`: Error code
/// - `message`: Human-readable message
/// - `details`: Additional error details (field errors, resource)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Extractor rejections =====

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => {
                AppError::validation("Request body has invalid fields").with_field_error("body", text)
            }
            JsonRejection::JsonSyntaxError(_) | JsonRejection::MissingJsonContentType(_) => {
                AppError::with_message(ErrorCode::InvalidFormat, "Request body must be valid JSON")
                    .with_field_error("body", text)
            }
            _ => AppError::with_message(ErrorCode::InvalidRequest, "Request body could not be read")
                .with_field_error("body", text),
        }
    }
}

/// A path segment that does not parse names no existing resource
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::with_message(ErrorCode::NotFound, "Resource not found")
            .with_field_error("path", rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation("Query string has invalid parameters")
            .with_field_error("query", rejection.body_text())
    }
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        // Log system errors; their internals never reach the client
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
            let public = AppError::new(self.code);
            return (status, Json(ApiResponse::error(&public))).into_response();
        }

        let body = ApiResponse::error(&self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::RecipeNotFound);
        assert_eq!(err.code, ErrorCode::RecipeNotFound);
        assert_eq!(err.message, "Recipe not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::not_found("Recipe").with_detail("id", 7);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Recipe not found");
        let details = err.details.unwrap();
        assert_eq!(details.get("resource").unwrap(), "Recipe");
        assert_eq!(details.get("id").unwrap(), 7);
    }

    #[test]
    fn test_with_field_error_appends() {
        let err = AppError::validation("bad")
            .with_field_error("tags", "first")
            .with_field_error("tags", "second");
        let details = err.details.unwrap();
        assert_eq!(
            details.get("tags").unwrap(),
            &serde_json::json!(["first", "second"])
        );
    }

    #[test]
    fn test_field_errors_empty_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_field_errors_first_violation_wins() {
        let mut errors = FieldErrors::new();
        errors.add("ingredients", "Add at least one ingredient");
        errors.add_with_code(ErrorCode::DuplicateTag, "tags", "Tags must not repeat");
        assert!(errors.has("tags"));

        let err = errors.into_result().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Add at least one ingredient");
        let details = err.details.unwrap();
        assert!(details.contains_key("ingredients"));
        assert!(details.contains_key("tags"));
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::conflict("Recipe is already in favorites").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_authenticated().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::new(ErrorCode::NotAuthor).http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::UserNotFound, "No such author");
        assert_eq!(format!("{}", err), "No such author");
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::with_message(ErrorCode::NotFound, "Tag not found")
            .with_detail("id", "12");
        let response = ApiResponse::error(&err);

        assert_eq!(response.code, 3);
        assert_eq!(response.message, "Tag not found");
        assert!(response.details.is_some());
    }

    #[test]
    fn test_api_response_serialize_skips_empty() {
        let response = ApiResponse::error(&AppError::token_expired());
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"code\":1003"));
        assert!(!json.contains("details"));
    }

    #[tokio::test]
    async fn test_json_data_rejection_is_validation_error() {
        use axum::extract::FromRequest;

        #[derive(Debug, Deserialize)]
        struct Item {
            #[allow(dead_code)]
            amount: i64,
        }

        let request = http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(r#"{"amount": "ten"}"#))
            .unwrap();
        let rejection = axum::Json::<Item>::from_request(request, &())
            .await
            .unwrap_err();

        let err = AppError::from(rejection);
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        let body = &err.details.unwrap()["body"];
        assert!(body[0].as_str().unwrap().contains("amount"));
    }

    #[tokio::test]
    async fn test_json_syntax_rejection_is_invalid_format() {
        use axum::extract::FromRequest;

        let request = http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{\"name\": "))
            .unwrap();
        let rejection = axum::Json::<Value>::from_request(request, &())
            .await
            .unwrap_err();

        let err = AppError::from(rejection);
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_system_error_hides_message() {
        use axum::response::IntoResponse;
        use http_body_util::BodyExt;

        let response = AppError::database("disk I/O error at page 12").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Database error");
    }
}
