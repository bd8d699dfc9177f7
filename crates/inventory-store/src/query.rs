use chrono::{DateTime, Utc};
use common::{ProductId, UserId};

use crate::{InventoryTransaction, TransactionType};

/// Builder for audit queries over the ledger.
///
/// Every filter is optional; an empty query matches the whole ledger.
/// Results are always returned newest first.
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    /// Filter by product.
    pub product_id: Option<ProductId>,

    /// Filter by acting user.
    pub user_id: Option<UserId>,

    /// Filter by transaction types (any of these types).
    pub transaction_types: Option<Vec<TransactionType>>,

    /// Filter by entries created at or after this timestamp.
    pub from_timestamp: Option<DateTime<Utc>>,

    /// Filter by entries created at or before this timestamp.
    pub to_timestamp: Option<DateTime<Utc>>,

    /// Maximum number of entries to return.
    pub limit: Option<usize>,

    /// Number of entries to skip.
    pub offset: Option<usize>,
}

impl TransactionQuery {
    /// Creates a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for a single product's entries.
    pub fn for_product(product_id: ProductId) -> Self {
        Self {
            product_id: Some(product_id),
            ..Default::default()
        }
    }

    /// Filters by product.
    pub fn product_id(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// Filters by acting user.
    pub fn user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Filters by a single transaction type.
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_types = Some(vec![transaction_type]);
        self
    }

    /// Filters by multiple transaction types (any of these).
    pub fn transaction_types(mut self, transaction_types: Vec<TransactionType>) -> Self {
        self.transaction_types = Some(transaction_types);
        self
    }

    /// Filters to entries created at or after this timestamp.
    pub fn from_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.from_timestamp = Some(timestamp);
        self
    }

    /// Filters to entries created at or before this timestamp.
    pub fn to_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.to_timestamp = Some(timestamp);
        self
    }

    /// Limits the number of entries returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips this many entries before returning results.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns true if the entry passes every filter (paging is not applied).
    pub fn matches(&self, tx: &InventoryTransaction) -> bool {
        if let Some(id) = self.product_id
            && tx.product_id != id
        {
            return false;
        }
        if let Some(id) = self.user_id
            && tx.user_id != id
        {
            return false;
        }
        if let Some(ref types) = self.transaction_types
            && !types.contains(&tx.transaction_type)
        {
            return false;
        }
        if let Some(from) = self.from_timestamp
            && tx.created_at < from
        {
            return false;
        }
        if let Some(to) = self.to_timestamp
            && tx.created_at > to
        {
            return false;
        }
        true
    }
}
