//! Short links
//!
//! A recipe's short code is its id in base 36; `/s/{code}` resolves it back.

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Encode a positive id
pub fn encode(mut id: u64) -> String {
    if id == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while id > 0 {
        digits.push(ALPHABET[(id % 36) as usize]);
        id /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Decode a code; `None` for empty, malformed or overflowing input
pub fn decode(code: &str) -> Option<u64> {
    if code.is_empty() || code.len() > 13 {
        return None;
    }
    code.chars().try_fold(0u64, |acc, c| {
        let digit = c.to_ascii_lowercase().to_digit(36)?;
        acc.checked_mul(36)?.checked_add(u64::from(digit))
    })
}

/// Path served by the redirect route
pub fn path_for(recipe_id: i64) -> String {
    format!("/s/{}", encode(recipe_id.max(0) as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(0), "0");
        assert_eq!(encode(35), "z");
        assert_eq!(encode(36), "10");
        assert_eq!(encode(1295), "zz");
    }

    #[test]
    fn test_decode_is_inverse() {
        for id in [1u64, 7, 36, 12345, 987_654_321] {
            assert_eq!(decode(&encode(id)), Some(id));
        }
        assert_eq!(decode("ZZ"), Some(1295));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("ab-c"), None);
        assert_eq!(decode("zzzzzzzzzzzzzz"), None);
    }

    #[test]
    fn test_path_for() {
        assert_eq!(path_for(37), "/s/11");
    }
}
