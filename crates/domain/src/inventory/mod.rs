//! Inventory ledger: transaction validation, appends and stock derivation.

mod commands;
mod rules;
mod service;
mod stock;

pub use commands::CreateTransaction;
pub use rules::SignRule;
pub use service::LedgerService;
pub use stock::StockCalculator;

use common::ProductId;
use inventory_store::TransactionType;
use thiserror::Error;

/// Errors that can occur when recording a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The quantity's sign does not fit the transaction type.
    #[error("{reason}")]
    InvalidQuantity {
        transaction_type: TransactionType,
        quantity_change: i32,
        reason: &'static str,
    },

    /// The type tag is not one of the known transaction types.
    #[error("invalid transaction type: {value:?}")]
    InvalidTransactionType { value: String },

    /// The referenced product does not exist.
    #[error("product with ID {0} not found")]
    ProductNotFound(ProductId),
}

impl InventoryError {
    /// Short label used when counting rejections.
    pub fn reason_label(&self) -> &'static str {
        match self {
            InventoryError::InvalidQuantity { .. } => "invalid_quantity",
            InventoryError::InvalidTransactionType { .. } => "invalid_transaction_type",
            InventoryError::ProductNotFound(_) => "product_not_found",
        }
    }
}
