//! Product catalog endpoints.
//!
//! Every product response carries `quantity`, derived from the ledger at
//! request time. Prices travel as integer cents.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::Money;
use domain::{CreateProduct, ProductView, UpdateProduct};
use inventory_store::{ProductStore, TransactionStore};
use serde::{Deserialize, Serialize};

use super::inventory::TransactionResponse;
use super::parse_product_id;
use crate::AppState;
use crate::error::ApiError;
use crate::extract::JsonBody;

// -- Request types --

#[derive(Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in cents.
    pub price: i64,
}

// -- Response types --

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub quantity: i64,
}

impl From<ProductView> for ProductResponse {
    fn from(view: ProductView) -> Self {
        Self {
            id: view.id.as_i64(),
            name: view.name,
            description: view.description,
            price: view.price.cents(),
            quantity: view.quantity,
        }
    }
}

// -- Handlers --

/// GET /products: every product with its current stock.
#[tracing::instrument(skip(state))]
pub async fn list<T, P>(
    State(state): State<Arc<AppState<T, P>>>,
) -> Result<Json<Vec<ProductResponse>>, ApiError>
where
    T: TransactionStore + Clone + 'static,
    P: ProductStore + Clone + 'static,
{
    let views = state.products.get_all_products().await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}

/// GET /products/{id}: one product with its current stock.
#[tracing::instrument(skip(state))]
pub async fn get<T, P>(
    State(state): State<Arc<AppState<T, P>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError>
where
    T: TransactionStore + Clone + 'static,
    P: ProductStore + Clone + 'static,
{
    let product_id = parse_product_id(&id)?;
    let view = state.products.get_product_by_id(product_id).await?;
    Ok(Json(view.into()))
}

/// POST /products: add a product to the catalog.
#[tracing::instrument(skip(state, req))]
pub async fn create<T, P>(
    State(state): State<Arc<AppState<T, P>>>,
    JsonBody(req): JsonBody<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError>
where
    T: TransactionStore + Clone + 'static,
    P: ProductStore + Clone + 'static,
{
    let cmd = CreateProduct::new(req.name, req.description, Money::from_cents(req.price));
    let view = state.products.create_product(cmd).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

/// PUT /products/{id}: replace name, description and price.
#[tracing::instrument(skip(state, req))]
pub async fn update<T, P>(
    State(state): State<Arc<AppState<T, P>>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ProductRequest>,
) -> Result<Json<ProductResponse>, ApiError>
where
    T: TransactionStore + Clone + 'static,
    P: ProductStore + Clone + 'static,
{
    let product_id = parse_product_id(&id)?;
    let cmd = UpdateProduct::new(req.name, req.description, Money::from_cents(req.price));
    let view = state.products.update_product(product_id, cmd).await?;
    Ok(Json(view.into()))
}

/// DELETE /products/{id}: remove a product; its ledger is kept.
#[tracing::instrument(skip(state))]
pub async fn delete<T, P>(
    State(state): State<Arc<AppState<T, P>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    T: TransactionStore + Clone + 'static,
    P: ProductStore + Clone + 'static,
{
    let product_id = parse_product_id(&id)?;
    state.products.delete_product(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /products/{id}/transactions: the product's audit trail, newest first.
#[tracing::instrument(skip(state))]
pub async fn transactions<T, P>(
    State(state): State<Arc<AppState<T, P>>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TransactionResponse>>, ApiError>
where
    T: TransactionStore + Clone + 'static,
    P: ProductStore + Clone + 'static,
{
    let product_id = parse_product_id(&id)?;
    let entries = state.ledger.transactions_for_product(product_id).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
