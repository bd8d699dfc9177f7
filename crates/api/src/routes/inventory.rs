//! Inventory ledger endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use common::{ProductId, UserId};
use domain::{CallerIdentity, CreateTransaction};
use inventory_store::{
    InventoryTransaction, ProductStore, TransactionQuery, TransactionStore, TransactionType,
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;
use crate::extract::JsonBody;

/// Largest page the audit query will return.
pub const MAX_PAGE_SIZE: usize = 1000;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateTransactionRequest {
    #[serde(rename = "productID")]
    pub product_id: i64,
    #[serde(rename = "type")]
    pub transaction_type: String,
    #[serde(rename = "quantityChange")]
    pub quantity_change: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionListParams {
    pub product_id: Option<i64>,
    pub user_id: Option<i64>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

// -- Response types --

#[derive(Serialize)]
pub struct TransactionResponse {
    pub id: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "productID")]
    pub product_id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(rename = "quantityChange")]
    pub quantity_change: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<InventoryTransaction> for TransactionResponse {
    fn from(t: InventoryTransaction) -> Self {
        Self {
            id: t.id.as_i64(),
            created_at: t.created_at,
            product_id: t.product_id.as_i64(),
            user_id: t.user_id.as_i64(),
            transaction_type: t.transaction_type,
            quantity_change: t.quantity_change,
            notes: t.notes,
        }
    }
}

// -- Handlers --

/// POST /inventory/transactions: record a stock movement for the caller.
#[tracing::instrument(skip(state, caller, req), fields(user_id = %caller.user_id))]
pub async fn create<T, P>(
    State(state): State<Arc<AppState<T, P>>>,
    Extension(caller): Extension<CallerIdentity>,
    JsonBody(req): JsonBody<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError>
where
    T: TransactionStore + Clone + 'static,
    P: ProductStore + Clone + 'static,
{
    let mut cmd = CreateTransaction::new(
        ProductId::new(req.product_id),
        req.transaction_type,
        req.quantity_change,
    );
    if let Some(notes) = req.notes {
        cmd = cmd.with_notes(notes);
    }

    let stored = state.ledger.create_transaction(cmd, &caller).await?;

    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// GET /inventory/transactions: audit query over the whole ledger.
#[tracing::instrument(skip(state))]
pub async fn list<T, P>(
    State(state): State<Arc<AppState<T, P>>>,
    Query(params): Query<TransactionListParams>,
) -> Result<Json<Vec<TransactionResponse>>, ApiError>
where
    T: TransactionStore + Clone + 'static,
    P: ProductStore + Clone + 'static,
{
    let query = build_query(params)?;
    let entries = state.ledger.query_transactions(query).await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

fn build_query(params: TransactionListParams) -> Result<TransactionQuery, ApiError> {
    let mut query = TransactionQuery::new()
        .limit(params.limit.unwrap_or(MAX_PAGE_SIZE).min(MAX_PAGE_SIZE));

    if let Some(id) = params.product_id {
        query = query.product_id(ProductId::new(id));
    }
    if let Some(id) = params.user_id {
        query = query.user_id(UserId::new(id));
    }
    if let Some(tag) = params.transaction_type {
        let transaction_type = tag
            .parse::<TransactionType>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        query = query.transaction_type(transaction_type);
    }
    if let Some(offset) = params.offset {
        if i64::try_from(offset).is_err() {
            return Err(ApiError::BadRequest(format!(
                "offset out of range: {offset}"
            )));
        }
        query = query.offset(offset);
    }

    Ok(query)
}
