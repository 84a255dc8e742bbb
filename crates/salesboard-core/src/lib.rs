//! Core dataset handling and query logic

pub mod error;
pub mod query;
pub mod reports;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use salesboard_config::Config;
use salesboard_source::{RawTransaction, SourceRef};
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Instant;

pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use query::{
    compute_bar_chart, compute_pie_chart, compute_statistics, filter_by_month, list_transactions,
    parse_month, ListQuery,
};
pub use reports::{
    BarChart, BarChartResponse, CombinedResponse, InitializeResponse, PieChart, PieChartResponse,
    Statistics, TransactionsResponse, PRICE_BUCKETS,
};
pub use salesboard_source::RecordId;

pub const INITIALIZED_MESSAGE: &str = "Database initialized successfully";

// ==================== Transaction ====================

/// A product transaction, immutable once loaded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sold: bool,
    /// Sale timestamp exactly as received
    pub date_of_sale: String,
    /// Wall-clock time of sale in the timestamp's own offset
    #[serde(skip)]
    sold_at: Option<NaiveDateTime>,
}

impl Transaction {
    /// Calendar month (1-12) of the sale, if the timestamp parsed
    pub fn sale_month(&self) -> Option<u32> {
        self.sold_at.map(|dt| dt.month())
    }

    /// Decimal form of the price used by text search
    pub fn price_text(&self) -> String {
        self.price.to_string()
    }
}

impl From<RawTransaction> for Transaction {
    fn from(raw: RawTransaction) -> Self {
        let sold_at = parse_sale_time(&raw.date_of_sale);
        if sold_at.is_none() {
            log::debug!("Transaction {} has unparseable dateOfSale {:?}", raw.id, raw.date_of_sale);
        }

        Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            price: raw.price,
            category: raw.category,
            image: raw.image,
            sold: raw.sold,
            date_of_sale: raw.date_of_sale,
            sold_at,
        }
    }
}

/// Accepts RFC 3339, offset-less ISO date-times, and plain dates
fn parse_sale_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .ok()
}

// ==================== Dataset ====================

/// Whether any load has succeeded yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Empty,
    Loaded,
}

#[derive(Debug, Clone, Default)]
struct StoreData {
    transactions: Arc<Vec<Transaction>>,
    loaded_at: Option<DateTime<Utc>>,
}

/// The in-memory transaction store and its loader
///
/// Readers take an `Arc` snapshot and never see a half-replaced store. The
/// write lock is held only for the pointer swap, never across a fetch.
pub struct Dataset {
    config: Config,
    source: SourceRef,
    data: RwLock<StoreData>,
}

impl Dataset {
    /// Create an empty dataset backed by `source`
    pub fn new(config: Config, source: SourceRef) -> Self {
        Self {
            config,
            source,
            data: RwLock::new(StoreData::default()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch the remote dataset and replace the store with it
    ///
    /// On failure the current store is left untouched.
    pub async fn initialize(&self) -> CoreResult<usize> {
        let started = Instant::now();
        let location = self.source.location().to_string();
        log::info!("Loading dataset from {}", location);

        let records = self
            .source
            .fetch()
            .await
            .map_err(|source| CoreError::FetchError {
                location: location.clone(),
                source,
            })?;

        let transactions: Vec<Transaction> = records.into_iter().map(Transaction::from).collect();
        let count = transactions.len();
        self.replace(transactions);

        log::info!(
            "Loaded {} transactions from {} in {:?}",
            count,
            location,
            started.elapsed()
        );
        Ok(count)
    }

    /// Swap in a new set of transactions
    pub fn replace(&self, transactions: Vec<Transaction>) {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        *data = StoreData {
            transactions: Arc::new(transactions),
            loaded_at: Some(Utc::now()),
        };
    }

    /// Current contents; stays valid across later reloads
    pub fn snapshot(&self) -> Arc<Vec<Transaction>> {
        Arc::clone(&self.data.read().unwrap_or_else(|e| e.into_inner()).transactions)
    }

    pub fn state(&self) -> StoreState {
        match self.loaded_at() {
            Some(_) => StoreState::Loaded,
            None => StoreState::Empty,
        }
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.data.read().unwrap_or_else(|e| e.into_inner()).loaded_at
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Page size used when a request gives none
    pub fn default_per_page(&self) -> usize {
        self.config.pagination.per_page
    }

    // ==================== Queries ====================

    pub fn list_transactions(&self, query: &ListQuery) -> TransactionsResponse {
        TransactionsResponse {
            transactions: list_transactions(&self.snapshot(), query),
        }
    }

    pub fn statistics(&self, month: Option<u32>) -> Statistics {
        compute_statistics(&self.snapshot(), month)
    }

    pub fn bar_chart(&self, month: Option<u32>) -> BarChartResponse {
        BarChartResponse {
            bar_chart_data: compute_bar_chart(&self.snapshot(), month),
        }
    }

    pub fn pie_chart(&self, month: Option<u32>) -> PieChartResponse {
        PieChartResponse {
            pie_chart_data: compute_pie_chart(&self.snapshot(), month),
        }
    }

    /// Reload (unless disabled in config) then run every query for `month`
    ///
    /// All four queries read the same snapshot. Any failure fails the whole
    /// view.
    pub async fn combined_view(&self, month: Option<u32>) -> CoreResult<CombinedResponse> {
        let initialize = if self.config.combined.reload_before_query {
            self.initialize()
                .await
                .map_err(|e| CoreError::UpstreamCallError {
                    operation: "initialize".to_string(),
                    message: e.to_string(),
                })?;
            InitializeResponse {
                message: INITIALIZED_MESSAGE.to_string(),
            }
        } else {
            InitializeResponse {
                message: format!("Using loaded dataset ({} transactions)", self.len()),
            }
        };

        let snapshot = self.snapshot();
        let list_query = ListQuery::new(month, self.default_per_page());

        Ok(CombinedResponse {
            initialize,
            list_transactions: TransactionsResponse {
                transactions: list_transactions(&snapshot, &list_query),
            },
            statistics: compute_statistics(&snapshot, month),
            bar_chart: BarChartResponse {
                bar_chart_data: compute_bar_chart(&snapshot, month),
            },
            pie_chart: PieChartResponse {
                pie_chart_data: compute_pie_chart(&snapshot, month),
            },
        })
    }
}


// ==================== Tests ====================
