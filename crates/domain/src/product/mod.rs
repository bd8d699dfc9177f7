//! Product catalog operations and the stock-enriched read model.

mod commands;
mod service;

pub use commands::{CreateProduct, UpdateProduct};
pub use service::ProductService;

use common::{Money, ProductId};
use inventory_store::Product;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    /// Product not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Name is blank.
    #[error("Product name is required")]
    NameRequired,

    /// Price is zero or negative.
    #[error("Invalid price: {price} (must be greater than 0)")]
    InvalidPrice { price: Money },
}

/// A product merged with its stock level derived from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub quantity: i64,
}

impl ProductView {
    pub(crate) fn new(product: Product, quantity: i64) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity,
        }
    }
}
