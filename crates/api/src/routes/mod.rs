//! HTTP route handlers.

pub mod health;
pub mod inventory;
pub mod metrics;
pub mod products;

use common::ProductId;

use crate::error::ApiError;

fn parse_product_id(id: &str) -> Result<ProductId, ApiError> {
    id.parse::<ProductId>()
        .map_err(|e| ApiError::BadRequest(format!("Invalid product ID: {e}")))
}
