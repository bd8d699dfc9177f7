//! Ledger commands.

use common::ProductId;
use inventory_store::TransactionType;

/// Command to record a stock movement.
///
/// `transaction_type` is the raw tag as received from the caller; it is
/// parsed by the ledger so an unknown tag surfaces as a domain error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTransaction {
    pub product_id: ProductId,
    pub transaction_type: String,
    pub quantity_change: i32,
    pub notes: Option<String>,
}

impl CreateTransaction {
    /// Creates a new CreateTransaction command.
    pub fn new(
        product_id: ProductId,
        transaction_type: impl Into<String>,
        quantity_change: i32,
    ) -> Self {
        Self {
            product_id,
            transaction_type: transaction_type.into(),
            quantity_change,
            notes: None,
        }
    }

    /// Creates a stock-in command.
    pub fn stock_in(product_id: ProductId, quantity_change: i32) -> Self {
        Self::new(product_id, TransactionType::StockIn.as_str(), quantity_change)
    }

    /// Creates a stock-out command.
    pub fn stock_out(product_id: ProductId, quantity_change: i32) -> Self {
        Self::new(product_id, TransactionType::StockOut.as_str(), quantity_change)
    }

    /// Creates an adjustment command.
    pub fn adjustment(product_id: ProductId, quantity_change: i32) -> Self {
        Self::new(product_id, TransactionType::Adjustment.as_str(), quantity_change)
    }

    /// Attaches notes to the command.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
