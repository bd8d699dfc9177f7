use inventory_store::TransactionType;

use super::InventoryError;

/// Sign constraint a transaction type places on its quantity change.
pub trait SignRule {
    /// Checks that `quantity_change` is allowed for this type.
    fn validate_quantity_change(&self, quantity_change: i32) -> Result<(), InventoryError>;
}

impl SignRule for TransactionType {
    fn validate_quantity_change(&self, quantity_change: i32) -> Result<(), InventoryError> {
        let violation = match self {
            TransactionType::StockIn if quantity_change <= 0 => {
                Some("stock-in quantity must be positive")
            }
            TransactionType::StockOut if quantity_change >= 0 => {
                Some("stock-out quantity must be negative")
            }
            TransactionType::Adjustment if quantity_change == 0 => {
                Some("quantity change for adjustment cannot be zero")
            }
            _ => None,
        };

        match violation {
            Some(reason) => Err(InventoryError::InvalidQuantity {
                transaction_type: *self,
                quantity_change,
                reason,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted(transaction_type: TransactionType, qty: i32) -> bool {
        transaction_type.validate_quantity_change(qty).is_ok()
    }

    fn rejected(transaction_type: TransactionType, qty: i32) -> bool {
        matches!(
            transaction_type.validate_quantity_change(qty),
            Err(InventoryError::InvalidQuantity { .. })
        )
    }

    #[test]
    fn stock_in_must_be_positive() {
        assert!(accepted(TransactionType::StockIn, 5));
        assert!(accepted(TransactionType::StockIn, 1));
        assert!(rejected(TransactionType::StockIn, 0));
        assert!(rejected(TransactionType::StockIn, -5));
    }

    #[test]
    fn stock_out_must_be_negative() {
        assert!(accepted(TransactionType::StockOut, -5));
        assert!(accepted(TransactionType::StockOut, -1));
        assert!(rejected(TransactionType::StockOut, 0));
        assert!(rejected(TransactionType::StockOut, 5));
    }

    #[test]
    fn adjustment_accepts_either_sign() {
        assert!(accepted(TransactionType::Adjustment, 7));
        assert!(accepted(TransactionType::Adjustment, -7));
        assert!(rejected(TransactionType::Adjustment, 0));
    }

    #[test]
    fn extreme_values() {
        assert!(accepted(TransactionType::StockIn, i32::MAX));
        assert!(accepted(TransactionType::StockOut, i32::MIN));
        assert!(rejected(TransactionType::StockIn, i32::MIN));
        assert!(rejected(TransactionType::StockOut, i32::MAX));
    }

    #[test]
    fn violation_messages() {
        let err = TransactionType::StockIn
            .validate_quantity_change(-5)
            .unwrap_err();
        assert_eq!(err.to_string(), "stock-in quantity must be positive");

        let err = TransactionType::StockOut
            .validate_quantity_change(5)
            .unwrap_err();
        assert_eq!(err.to_string(), "stock-out quantity must be negative");

        let err = TransactionType::Adjustment
            .validate_quantity_change(0)
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::InvalidQuantity {
                transaction_type: TransactionType::Adjustment,
                quantity_change: 0,
                reason: "quantity change for adjustment cannot be zero",
            }
        );
    }
}
