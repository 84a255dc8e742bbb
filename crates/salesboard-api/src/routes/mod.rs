//! Route modules for the API server
//!
//! - dataset: loading the store and the combined view
//! - reports: month queries over the loaded store

pub mod dataset;
pub mod reports;

use std::collections::HashMap;

/// Raw query parameters, parsed leniently by each handler
pub type QueryParams = axum::extract::Query<HashMap<String, String>>;

/// Parse a positive count, falling back to `default` when absent or unparseable
pub(crate) fn parse_count(params: &HashMap<String, String>, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        let params: HashMap<String, String> = [
            ("page".to_string(), "3".to_string()),
            ("per_page".to_string(), "ten".to_string()),
            ("zero".to_string(), "0".to_string()),
            ("negative".to_string(), "-2".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(parse_count(&params, "page", 1), 3);
        assert_eq!(parse_count(&params, "per_page", 10), 10);
        assert_eq!(parse_count(&params, "zero", 10), 0);
        assert_eq!(parse_count(&params, "negative", 1), 1);
        assert_eq!(parse_count(&params, "missing", 7), 7);
    }
}
