//! Domain error types.

use inventory_store::StoreError;
use thiserror::Error;

use crate::inventory::InventoryError;
use crate::product::ProductError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A ledger rule was violated.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// A product rule was violated.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// The backing store failed. Nothing was written.
    #[error("Storage error while {context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl DomainError {
    /// Returns a mapper that wraps a store error with what was being attempted.
    pub(crate) fn storage(context: &'static str) -> impl FnOnce(StoreError) -> DomainError {
        move |source| DomainError::Storage { context, source }
    }

    /// True for errors the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DomainError::Storage { .. })
    }
}

#[cfg(test)]
mod tests {
    use common::ProductId;

    use super::*;

    #[test]
    fn storage_errors_are_not_client_errors() {
        let err = DomainError::storage("appending transaction")(StoreError::InvalidRecord(
            "bad tag".to_string(),
        ));
        assert!(!err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Storage error while appending transaction: Invalid stored record: bad tag"
        );
    }

    #[test]
    fn validation_errors_keep_their_message() {
        let err = DomainError::from(InventoryError::ProductNotFound(ProductId::new(99999)));
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "product with ID 99999 not found");
    }
}
