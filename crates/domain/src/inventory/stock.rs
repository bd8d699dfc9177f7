use async_trait::async_trait;
use common::ProductId;

use crate::error::DomainError;

/// Derives a product's current stock from the ledger.
///
/// Consumers (the product read path) depend on this capability rather
/// than on the ledger service itself.
#[async_trait]
pub trait StockCalculator: Send + Sync {
    /// Returns the sum of all quantity changes recorded for the product.
    ///
    /// A product with no ledger entries has stock 0; that is not an error.
    async fn calculate_stock_for_product(&self, product_id: ProductId) -> Result<i64, DomainError>;
}
