//! Unified error codes for the recipe service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Recipe catalog errors (recipes, tags, ingredients)
//! - 4xxx: Relation errors (favorites, shopping cart, subscriptions)
//! - 5xxx: User account errors
//! - 6xxx: Media errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the web frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Only the author may change this resource
    NotAuthor = 2002,

    // ==================== 3xxx: Recipe catalog ====================
    /// Recipe not found
    RecipeNotFound = 3001,
    /// Ingredient not found
    IngredientNotFound = 3002,
    /// Tag not found
    TagNotFound = 3003,
    /// Same tag listed twice
    DuplicateTag = 3004,
    /// Same ingredient listed twice
    DuplicateIngredient = 3005,
    /// Short link code does not resolve
    InvalidShortLink = 3006,

    // ==================== 4xxx: Relations ====================
    /// Recipe already in favorites
    AlreadyFavorited = 4001,
    /// Recipe is not in favorites
    NotFavorited = 4002,
    /// Recipe already in shopping cart
    AlreadyInCart = 4003,
    /// Recipe is not in shopping cart
    NotInCart = 4004,
    /// Already subscribed to author
    AlreadySubscribed = 4005,
    /// Not subscribed to author
    NotSubscribed = 4006,
    /// Cannot subscribe to yourself
    SelfSubscription = 4007,

    // ==================== 5xxx: Users ====================
    /// User not found
    UserNotFound = 5001,
    /// Username already taken
    UsernameTaken = 5002,
    /// Email already registered
    EmailTaken = 5003,
    /// Username contains forbidden characters or is reserved
    InvalidUsername = 5004,
    /// Password too short
    PasswordTooShort = 5005,
    /// Current password does not match
    WrongPassword = 5006,

    // ==================== 6xxx: Media ====================
    /// Decoded image is not a supported image
    InvalidImageFile = 6001,
    /// Image format is not supported
    UnsupportedImageFormat = 6002,
    /// Image exceeds the size limit
    ImageTooLarge = 6003,
    /// Image could not be stored
    FileStorageFailed = 6004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication credentials were not provided",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::NotAuthor => "Only the author can change this recipe",

            // Recipe catalog
            ErrorCode::RecipeNotFound => "Recipe not found",
            ErrorCode::IngredientNotFound => "Ingredient not found",
            ErrorCode::TagNotFound => "Tag not found",
            ErrorCode::DuplicateTag => "Tags must not repeat",
            ErrorCode::DuplicateIngredient => "Ingredients must be unique",
            ErrorCode::InvalidShortLink => "Short link not found",

            // Relations
            ErrorCode::AlreadyFavorited => "Recipe is already in favorites",
            ErrorCode::NotFavorited => "Recipe was not added to favorites",
            ErrorCode::AlreadyInCart => "Recipe is already in the shopping cart",
            ErrorCode::NotInCart => "Recipe was not added to the shopping cart",
            ErrorCode::AlreadySubscribed => "You are already subscribed to this author",
            ErrorCode::NotSubscribed => "You are not subscribed to this author",
            ErrorCode::SelfSubscription => "You cannot subscribe to yourself",

            // Users
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UsernameTaken => "A user with that username already exists",
            ErrorCode::EmailTaken => "A user with that email already exists",
            ErrorCode::InvalidUsername => "Username is not allowed",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",
            ErrorCode::WrongPassword => "Current password is incorrect",

            // Media
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::UnsupportedImageFormat => "Unsupported image format",
            ErrorCode::ImageTooLarge => "Image is too large",
            ErrorCode::FileStorageFailed => "File storage failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2002 => Ok(ErrorCode::NotAuthor),

            // Recipe catalog
            3001 => Ok(ErrorCode::RecipeNotFound),
            3002 => Ok(ErrorCode::IngredientNotFound),
            3003 => Ok(ErrorCode::TagNotFound),
            3004 => Ok(ErrorCode::DuplicateTag),
            3005 => Ok(ErrorCode::DuplicateIngredient),
            3006 => Ok(ErrorCode::InvalidShortLink),

            // Relations
            4001 => Ok(ErrorCode::AlreadyFavorited),
            4002 => Ok(ErrorCode::NotFavorited),
            4003 => Ok(ErrorCode::AlreadyInCart),
            4004 => Ok(ErrorCode::NotInCart),
            4005 => Ok(ErrorCode::AlreadySubscribed),
            4006 => Ok(ErrorCode::NotSubscribed),
            4007 => Ok(ErrorCode::SelfSubscription),

            // Users
            5001 => Ok(ErrorCode::UserNotFound),
            5002 => Ok(ErrorCode::UsernameTaken),
            5003 => Ok(ErrorCode::EmailTaken),
            5004 => Ok(ErrorCode::InvalidUsername),
            5005 => Ok(ErrorCode::PasswordTooShort),
            5006 => Ok(ErrorCode::WrongPassword),

            // Media
            6001 => Ok(ErrorCode::InvalidImageFile),
            6002 => Ok(ErrorCode::UnsupportedImageFormat),
            6003 => Ok(ErrorCode::ImageTooLarge),
            6004 => Ok(ErrorCode::FileStorageFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
