//! Pagination envelope

use serde::{Deserialize, Serialize};

/// One page of a list endpoint
///
/// `next` and `previous` are absolute URLs, `None` at either end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of matching records
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_serialize_nulls() {
        let page = Page {
            count: 1,
            next: None,
            previous: None,
            results: vec![5],
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"count": 1, "next": null, "previous": null, "results": [5]})
        );
    }
}
