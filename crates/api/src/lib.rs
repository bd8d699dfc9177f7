//! HTTP API server with observability for the inventory ledger.
//!
//! Provides REST endpoints for the product catalog and the append-only
//! transaction ledger, with bearer-token authentication, structured
//! logging (tracing) and Prometheus metrics.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use domain::{LedgerService, ProductService};
use inventory_store::{ProductStore, TransactionStore};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use auth::JwtVerifier;

/// Shared application state accessible from all handlers.
pub struct AppState<T: TransactionStore, P: ProductStore> {
    pub ledger: LedgerService<T, P>,
    pub products: ProductService<P, LedgerService<T, P>>,
}

/// Wires both services over one pair of stores.
///
/// The product service derives stock through the same ledger service that
/// handles writes, so reads always see every committed append.
pub fn create_state<T, P>(transactions: T, products: P) -> Arc<AppState<T, P>>
where
    T: TransactionStore + Clone + 'static,
    P: ProductStore + Clone + 'static,
{
    let ledger = LedgerService::new(transactions, products.clone());
    let products = ProductService::new(products, ledger.clone());
    Arc::new(AppState { ledger, products })
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<T, P>(
    state: Arc<AppState<T, P>>,
    verifier: JwtVerifier,
    metrics_handle: PrometheusHandle,
) -> Router
where
    T: TransactionStore + Clone + 'static,
    P: ProductStore + Clone + 'static,
{
    use routes::{inventory, products};

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let protected = Router::new()
        .route(
            "/products",
            get(products::list::<T, P>).post(products::create::<T, P>),
        )
        .route(
            "/products/{id}",
            get(products::get::<T, P>)
                .put(products::update::<T, P>)
                .delete(products::delete::<T, P>),
        )
        .route(
            "/products/{id}/transactions",
            get(products::transactions::<T, P>),
        )
        .route(
            "/inventory/transactions",
            get(inventory::list::<T, P>).post(inventory::create::<T, P>),
        )
        .route_layer(middleware::from_fn_with_state(verifier, auth::require_auth))
        .with_state(state);

    Router::new()
        .route("/health", get(routes::health::check))
        .merge(protected)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
