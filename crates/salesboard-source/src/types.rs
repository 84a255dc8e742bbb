//! Wire types for the remote dataset

use serde::{Deserialize, Serialize};

/// Record identifier as it appears in the source (numeric or textual)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One product transaction exactly as served by the remote dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub sold: bool,
    /// RFC 3339 timestamp, e.g. "2021-11-27T20:29:54+05:30"
    pub date_of_sale: String,
}

/// Decode a JSON array of transactions
pub fn decode_records(bytes: &[u8]) -> Result<Vec<RawTransaction>, crate::SourceError> {
    serde_json::from_slice(bytes).map_err(|e| crate::SourceError::InvalidPayload {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_source_record() {
        let body = br#"[{
            "id": 1,
            "title": "Fjallraven  - Foldsack No. 1 Backpack",
            "price": 329.85,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "sold": false,
            "dateOfSale": "2021-11-27T20:29:54+05:30"
        }]"#;

        let records = decode_records(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, RecordId::Number(1));
        assert_eq!(records[0].price, 329.85);
        assert_eq!(records[0].date_of_sale, "2021-11-27T20:29:54+05:30");
        assert!(!records[0].sold);
    }

    #[test]
    fn test_decode_optional_fields_default() {
        let body = br#"[{"id": "a-1", "title": "Mug", "price": 5, "category": "home", "dateOfSale": "2022-03-01"}]"#;

        let records = decode_records(body).unwrap();
        assert_eq!(records[0].id, RecordId::Text("a-1".to_string()));
        assert_eq!(records[0].description, "");
        assert!(records[0].image.is_none());
        assert!(!records[0].sold);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let result = decode_records(br#"{"transactions": []}"#);
        assert!(matches!(result, Err(crate::SourceError::InvalidPayload { .. })));
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::Number(42).to_string(), "42");
        assert_eq!(RecordId::Text("x9".to_string()).to_string(), "x9");
    }
}
