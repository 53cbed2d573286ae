//! Multi-value query string helpers
//!
//! Handlers extract `Query<Vec<(String, String)>>` so repeated keys such as
//! `tags=lunch&tags=dinner` survive; these helpers read typed values out of it.

use super::AppError;

pub type QueryPairs = [(String, String)];

/// Last value for `key`, if present and non-empty
pub fn get<'a>(pairs: &'a QueryPairs, key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.as_str())
}

/// Every non-empty value for `key`, in order
pub fn get_all<'a>(pairs: &'a QueryPairs, key: &str) -> Vec<&'a str> {
    pairs
        .iter()
        .filter(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.as_str())
        .collect()
}

/// Parse an integer parameter; malformed values are a validation error
pub fn get_i64(pairs: &QueryPairs, key: &str) -> Result<Option<i64>, AppError> {
    get(pairs, key)
        .map(|raw| {
            raw.parse::<i64>().map_err(|_| {
                AppError::validation(format!("{key} must be an integer"))
                    .with_field_error(key, "A valid integer is required")
            })
        })
        .transpose()
}

/// Parse a boolean flag accepting `1`/`0`/`true`/`false`
pub fn get_bool(pairs: &QueryPairs, key: &str) -> Result<Option<bool>, AppError> {
    get(pairs, key)
        .map(|raw| match raw.to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(AppError::validation(format!("{key} must be 1, 0, true or false"))
                .with_field_error(key, "Select a valid choice")),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_get_all_keeps_repeated_values() {
        let q = pairs(&[("tags", "lunch"), ("author", "3"), ("tags", "dinner")]);
        assert_eq!(get_all(&q, "tags"), vec!["lunch", "dinner"]);
        assert_eq!(get(&q, "author"), Some("3"));
    }

    #[test]
    fn test_empty_value_is_absent() {
        let q = pairs(&[("author", "")]);
        assert_eq!(get_i64(&q, "author").unwrap(), None);
    }

    #[test]
    fn test_get_i64_malformed() {
        let q = pairs(&[("author", "abc")]);
        let err = get_i64(&q, "author").unwrap_err();
        assert!(err.details.unwrap().contains_key("author"));
    }

    #[test]
    fn test_get_bool_variants() {
        for (raw, expected) in [("1", true), ("true", true), ("0", false), ("False", false)] {
            let q = pairs(&[("is_favorited", raw)]);
            assert_eq!(get_bool(&q, "is_favorited").unwrap(), Some(expected));
        }
        let q = pairs(&[("is_favorited", "yes")]);
        assert!(get_bool(&q, "is_favorited").is_err());
    }
}
