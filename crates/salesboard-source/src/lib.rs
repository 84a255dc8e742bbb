//! Remote dataset sources
//!
//! A source produces the full list of product transactions in the order
//! the remote serves them.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub mod error;
pub mod http;
pub mod types;

pub use error::SourceError;
pub use http::HttpDatasetSource;
pub use types::{decode_records, RawTransaction, RecordId};

// ==================== Source Trait ====================

/// Source reference type
pub type SourceRef = Arc<dyn DatasetSource>;

/// Trait for dataset sources
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch every transaction record
    async fn fetch(&self) -> Result<Vec<RawTransaction>, SourceError>;

    /// Where the records come from, for logging
    fn location(&self) -> &str;
}

/// In-memory source, mainly for tests and offline runs
#[derive(Debug)]
pub struct StaticDatasetSource {
    records: Mutex<Result<Vec<RawTransaction>, String>>,
}

impl StaticDatasetSource {
    pub fn new(records: Vec<RawTransaction>) -> Self {
        Self {
            records: Mutex::new(Ok(records)),
        }
    }

    /// A source whose every fetch fails with a connection error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Mutex::new(Err(message.into())),
        }
    }

    /// Swap what the next fetch returns
    pub fn set_records(&self, records: Vec<RawTransaction>) {
        *self.records.lock().unwrap_or_else(|e| e.into_inner()) = Ok(records);
    }

    /// Make subsequent fetches fail
    pub fn set_failing(&self, message: impl Into<String>) {
        *self.records.lock().unwrap_or_else(|e| e.into_inner()) = Err(message.into());
    }
}

#[async_trait]
impl DatasetSource for StaticDatasetSource {
    async fn fetch(&self) -> Result<Vec<RawTransaction>, SourceError> {
        match &*self.records.lock().unwrap_or_else(|e| e.into_inner()) {
            Ok(records) => Ok(records.clone()),
            Err(message) => Err(SourceError::ConnectionFailed {
                url: self.location().to_string(),
                message: message.clone(),
            }),
        }
    }

    fn location(&self) -> &str {
        "memory://static"
    }
}
