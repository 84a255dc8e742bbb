//! HTTP API server
//!
//! Routes are organized into modules:
//! - routes::dataset: `/initialize-database`, `/combined-response`
//! - routes::reports: `/list-transactions`, `/statistics`, `/bar-chart`, `/pie-chart`

pub mod error;
pub mod routes;

use axum::{routing::get, Router};
use salesboard_config::Config;
use salesboard_core::Dataset;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub config: Config,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let config = dataset.config().clone();
        Self { dataset, config }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dataset::{combined_response, initialize_database};
    use routes::reports::{bar_chart, list_transactions, pie_chart, statistics};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/initialize-database", get(initialize_database))
        .route("/list-transactions", get(list_transactions))
        .route("/statistics", get(statistics))
        .route("/bar-chart", get(bar_chart))
        .route("/pie-chart", get(pie_chart))
        .route("/combined-response", get(combined_response))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Bind the configured address and serve until the listener fails
pub async fn start_server(dataset: Arc<Dataset>) -> std::io::Result<()> {
    let state = AppState::new(dataset);
    let addr = state.config.bind_address();

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting salesboard server on http://{}", addr);
    log::info!(
        "Dataset source: {} (store {:?}, {} transactions)",
        state.config.source.url,
        state.dataset.state(),
        state.dataset.len()
    );

    let router = create_router(state);
    axum::serve(listener, router).await?;
    log::info!("Server stopped");
    Ok(())
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use salesboard_source::{RawTransaction, RecordId, StaticDatasetSource};
    use serde_json::Value;
    use tower::ServiceExt;

    fn raw(id: u64, title: &str, price: f64, category: &str, date_of_sale: &str) -> RawTransaction {
        RawTransaction {
            id: RecordId::Number(id),
            title: title.to_string(),
            description: format!("{} description", title),
            price,
            category: category.to_string(),
            image: Some(format!("https://img.test/{}.jpg", id)),
            sold: id % 2 == 0,
            date_of_sale: date_of_sale.to_string(),
        }
    }

    fn seed() -> Vec<RawTransaction> {
        vec![
            raw(1, "Backpack", 50.0, "A", "2022-01-10T08:00:00+05:30"),
            raw(2, "Jacket", 150.0, "B", "2021-01-22T14:30:00+05:30"),
            raw(3, "Monitor", 999.0, "A", "2022-02-01T09:00:00+05:30"),
        ]
    }

    fn setup(config: Config) -> (Arc<StaticDatasetSource>, Arc<Dataset>, Router) {
        let source = Arc::new(StaticDatasetSource::new(seed()));
        let dataset = Arc::new(Dataset::new(config, source.clone()));
        let router = create_router(AppState::new(dataset.clone()));
        (source, dataset, router)
    }

    async fn get_response(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = get_response(router, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (_, _, router) = setup(Config::default());
        let (status, body) = get_response(&router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn test_initialize_then_query_month() {
        let (_, dataset, router) = setup(Config::default());

        let (status, body) = get_json(&router, "/initialize-database").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Database initialized successfully");
        assert_eq!(dataset.len(), 3);

        let (status, body) = get_json(&router, "/statistics?month=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalSaleAmount"], 200.0);
        assert_eq!(body["soldItems"], 2);
        assert_eq!(body["notSoldItems"], 1);

        let (_, body) = get_json(&router, "/bar-chart?month=1").await;
        let buckets = body["bar_chart_data"].as_object().unwrap();
        assert_eq!(buckets.len(), 10);
        assert_eq!(buckets["0-100"], 1);
        assert_eq!(buckets["101-200"], 1);
        assert_eq!(buckets["901-above"], 0);

        let (_, body) = get_json(&router, "/pie-chart?month=1").await;
        assert_eq!(body["pie_chart_data"], serde_json::json!({ "A": 1, "B": 1 }));
    }

    #[tokio::test]
    async fn test_list_transactions_search_and_pagination() {
        let (_, dataset, router) = setup(Config::default());
        dataset.initialize().await.unwrap();

        let (status, body) = get_json(&router, "/list-transactions?month=1&search_text=50").await;
        assert_eq!(status, StatusCode::OK);
        let transactions = body["transactions"].as_array().unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[1]["title"], "Jacket");
        assert_eq!(transactions[1]["dateOfSale"], "2021-01-22T14:30:00+05:30");
        assert_eq!(transactions[1]["image"], "https://img.test/2.jpg");

        let (_, body) = get_json(&router, "/list-transactions?month=1&page=2&per_page=1").await;
        let transactions = body["transactions"].as_array().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0]["id"], 2);

        let (_, body) = get_json(&router, "/list-transactions?month=1&page=0").await;
        assert!(body["transactions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_params_degrade_gracefully() {
        let (_, dataset, router) = setup(Config::default());
        dataset.initialize().await.unwrap();

        let (status, body) = get_json(&router, "/list-transactions?month=1&page=abc&per_page=-5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transactions"].as_array().unwrap().len(), 2);

        let (status, body) = get_json(&router, "/statistics?month=banana").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["soldItems"], 0);
        assert_eq!(body["notSoldItems"], 3);

        let (status, body) = get_json(&router, "/pie-chart").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pie_chart_data"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_initialize_failure_returns_500_and_keeps_store() {
        let (source, dataset, router) = setup(Config::default());
        dataset.initialize().await.unwrap();

        source.set_failing("connection refused");
        let (status, body) = get_json(&router, "/initialize-database").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal Server Error" }));
        assert_eq!(dataset.len(), 3);

        let (_, body) = get_json(&router, "/statistics?month=1").await;
        assert_eq!(body["soldItems"], 2);
    }

    #[tokio::test]
    async fn test_combined_response() {
        let (_, _, router) = setup(Config::default());

        let (status, body) = get_json(&router, "/combined-response?month=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["initialize"]["message"], "Database initialized successfully");
        assert_eq!(body["list_transactions"]["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(body["statistics"]["totalSaleAmount"], 200.0);
        assert_eq!(body["bar_chart"]["bar_chart_data"]["101-200"], 1);
        assert_eq!(body["pie_chart"]["pie_chart_data"]["B"], 1);
    }

    #[tokio::test]
    async fn test_combined_response_failure_has_no_partial_body() {
        let (source, _, router) = setup(Config::default());
        source.set_failing("offline");

        let (status, body) = get_json(&router, "/combined-response?month=1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal Server Error" }));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let (_, _, router) = setup(Config::default());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/statistics?month=1")
                    .header("origin", "http://dashboard.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
