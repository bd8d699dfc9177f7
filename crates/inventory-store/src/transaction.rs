use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::{ProductId, TransactionId, UserId};
use serde::{Deserialize, Serialize};

/// Kind of stock movement recorded in the ledger.
///
/// The set is closed; it is persisted and serialized as its string tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    StockIn,
    StockOut,
    Adjustment,
}

impl TransactionType {
    /// All transaction types, in tag order.
    pub const ALL: [TransactionType; 3] = [
        TransactionType::StockIn,
        TransactionType::StockOut,
        TransactionType::Adjustment,
    ];

    /// Returns the persisted string tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::StockIn => "stock_in",
            TransactionType::StockOut => "stock_out",
            TransactionType::Adjustment => "adjustment",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the transaction type tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTransactionTypeError {
    pub value: String,
}

impl std::fmt::Display for ParseTransactionTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown transaction type: {:?}", self.value)
    }
}

impl std::error::Error for ParseTransactionTypeError {}

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseTransactionTypeError {
                value: s.to_string(),
            })
    }
}

/// A persisted ledger entry.
///
/// Entries are immutable: the store assigns `id` and `created_at` on append
/// and offers no way to change or remove them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: TransactionId,
    pub created_at: DateTime<Utc>,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub transaction_type: TransactionType,
    pub quantity_change: i32,
    pub notes: Option<String>,
}

/// A ledger entry that has not been appended yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub transaction_type: TransactionType,
    pub quantity_change: i32,
    pub notes: Option<String>,
}

impl NewTransaction {
    /// Creates a new unsaved entry without notes.
    pub fn new(
        product_id: ProductId,
        user_id: UserId,
        transaction_type: TransactionType,
        quantity_change: i32,
    ) -> Self {
        Self {
            product_id,
            user_id,
            transaction_type,
            quantity_change,
            notes: None,
        }
    }

    /// Attaches free-text notes. Blank notes are dropped.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    /// Turns the entry into a persisted record with store-assigned fields.
    pub(crate) fn into_record(
        self,
        id: TransactionId,
        created_at: DateTime<Utc>,
    ) -> InventoryTransaction {
        InventoryTransaction {
            id,
            created_at,
            product_id: self.product_id,
            user_id: self.user_id,
            transaction_type: self.transaction_type,
            quantity_change: self.quantity_change,
            notes: self.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_tags_round_trip() {
        for t in TransactionType::ALL {
            assert_eq!(t.as_str().parse::<TransactionType>().unwrap(), t);
        }
    }

    #[test]
    fn transaction_type_rejects_unknown_tag() {
        let err = "transfer".parse::<TransactionType>().unwrap_err();
        assert_eq!(err.value, "transfer");
        assert!("StockIn".parse::<TransactionType>().is_err());
    }

    #[test]
    fn transaction_type_serializes_as_tag() {
        let json = serde_json::to_string(&TransactionType::StockOut).unwrap();
        assert_eq!(json, "\"stock_out\"");
    }

    #[test]
    fn blank_notes_are_dropped() {
        let tx = NewTransaction::new(
            ProductId::new(1),
            UserId::new(1),
            TransactionType::StockIn,
            3,
        )
        .with_notes("   ");
        assert_eq!(tx.notes, None);

        let tx = tx.with_notes("pallet 4");
        assert_eq!(tx.notes.as_deref(), Some("pallet 4"));
    }
}
