//! Prometheus metrics endpoint and metric descriptions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

/// Registers help text for the ledger metrics.
///
/// Call once after the recorder is installed.
pub fn describe() {
    metrics::describe_counter!(
        "inventory_transactions_created_total",
        "Ledger entries appended, by transaction type"
    );
    metrics::describe_counter!(
        "inventory_transactions_rejected_total",
        "Ledger writes refused before append, by reason"
    );
    metrics::describe_histogram!(
        "stock_aggregation_duration_seconds",
        metrics::Unit::Seconds,
        "Time spent summing a product's ledger"
    );
}

/// GET /metrics: Prometheus text exposition.
pub async fn get(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        handle.render(),
    )
}
