//! Input validation helpers
//!
//! Text length constants and account field checks shared by handlers.

use std::sync::LazyLock;

use regex::Regex;
use shared::error::FieldErrors;

/// First/last names
pub const MAX_PERSON_NAME_LEN: usize = 150;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Usernames that would shadow fixed routes
pub const RESERVED_USERNAMES: &[&str] = &["me"];

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9._-]{1,20}$").expect("username pattern is valid")
});

/// Record an error when a required string is blank or too long (in characters)
pub fn check_required_text(errors: &mut FieldErrors, value: &str, field: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.add(field, format!("{field} must not be empty"));
    } else if value.chars().count() > max_len {
        errors.add(
            field,
            format!(
                "{field} is too long ({} chars, max {max_len})",
                value.chars().count()
            ),
        );
    }
}

pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username) && !RESERVED_USERNAMES.contains(&username)
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
