//! Month queries over the loaded store
//!
//! None of these fail: a missing or invalid month yields empty results.

use super::{parse_count, QueryParams};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use salesboard_core::{
    parse_month, BarChartResponse, ListQuery, PieChartResponse, Statistics, TransactionsResponse,
};

pub async fn list_transactions(
    State(state): State<AppState>,
    query: QueryParams,
) -> Json<TransactionsResponse> {
    let month = parse_month(query.get("month").map(String::as_str));
    let mut list_query = ListQuery::new(
        month,
        parse_count(&query, "per_page", state.dataset.default_per_page()),
    )
    .with_page(parse_count(&query, "page", 1));
    if let Some(text) = query.get("search_text") {
        list_query = list_query.with_search(text.as_str());
    }
    log::debug!("list-transactions {:?}", list_query);

    Json(state.dataset.list_transactions(&list_query))
}

pub async fn statistics(State(state): State<AppState>, query: QueryParams) -> Json<Statistics> {
    let month = parse_month(query.get("month").map(String::as_str));
    log::debug!("statistics month={:?}", month);
    Json(state.dataset.statistics(month))
}

pub async fn bar_chart(State(state): State<AppState>, query: QueryParams) -> Json<BarChartResponse> {
    let month = parse_month(query.get("month").map(String::as_str));
    log::debug!("bar-chart month={:?}", month);
    Json(state.dataset.bar_chart(month))
}

pub async fn pie_chart(State(state): State<AppState>, query: QueryParams) -> Json<PieChartResponse> {
    let month = parse_month(query.get("month").map(String::as_str));
    log::debug!("pie-chart month={:?}", month);
    Json(state.dataset.pie_chart(month))
}
