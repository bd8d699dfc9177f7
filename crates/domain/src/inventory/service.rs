//! Ledger service: the single writer to the transaction store.

use std::time::Instant;

use async_trait::async_trait;
use common::ProductId;
use inventory_store::{
    InventoryTransaction, NewTransaction, ProductStore, ProductStoreExt, TransactionQuery,
    TransactionStore, TransactionType,
};

use super::{CreateTransaction, InventoryError, SignRule, StockCalculator};
use crate::error::DomainError;
use crate::identity::CallerIdentity;

/// Service for recording stock movements and deriving stock levels.
///
/// Validation happens here, never in the store: the type tag is parsed,
/// the sign rule checked and the product reference resolved before a
/// single append is issued. There is no update or delete path.
#[derive(Clone)]
pub struct LedgerService<T: TransactionStore, P: ProductStore> {
    transactions: T,
    products: P,
}

impl<T: TransactionStore, P: ProductStore> LedgerService<T, P> {
    /// Creates a new ledger service over the given stores.
    pub fn new(transactions: T, products: P) -> Self {
        Self {
            transactions,
            products,
        }
    }

    /// Returns a reference to the underlying transaction store.
    pub fn transactions(&self) -> &T {
        &self.transactions
    }

    /// Validates and appends a ledger entry on behalf of `caller`.
    ///
    /// The first violated rule wins: type tag, then sign rule, then
    /// product existence. A storage failure means nothing was recorded.
    #[tracing::instrument(skip(self, cmd), fields(product_id = %cmd.product_id, user_id = %caller.user_id))]
    pub async fn create_transaction(
        &self,
        cmd: CreateTransaction,
        caller: &CallerIdentity,
    ) -> Result<InventoryTransaction, DomainError> {
        let transaction_type = validate_request(&cmd).inspect_err(record_rejection)?;

        let exists = self
            .products
            .product_exists(cmd.product_id)
            .await
            .map_err(DomainError::storage("checking product existence"))?;
        if !exists {
            let err = InventoryError::ProductNotFound(cmd.product_id);
            record_rejection(&err);
            return Err(err.into());
        }

        let mut entry = NewTransaction::new(
            cmd.product_id,
            caller.user_id,
            transaction_type,
            cmd.quantity_change,
        );
        if let Some(notes) = cmd.notes {
            entry = entry.with_notes(notes);
        }

        let stored = self
            .transactions
            .append(entry)
            .await
            .map_err(DomainError::storage("appending transaction"))?;

        metrics::counter!("inventory_transactions_created_total", "type" => transaction_type.as_str())
            .increment(1);
        tracing::info!(
            transaction_id = %stored.id,
            transaction_type = %stored.transaction_type,
            quantity_change = stored.quantity_change,
            "inventory transaction recorded"
        );

        Ok(stored)
    }

    /// Returns the audit trail for a product, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn transactions_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<InventoryTransaction>, DomainError> {
        let exists = self
            .products
            .product_exists(product_id)
            .await
            .map_err(DomainError::storage("checking product existence"))?;
        if !exists {
            return Err(InventoryError::ProductNotFound(product_id).into());
        }

        self.transactions
            .list_by_product(product_id)
            .await
            .map_err(DomainError::storage("listing transactions"))
    }

    /// Runs an audit query over the whole ledger.
    #[tracing::instrument(skip(self))]
    pub async fn query_transactions(
        &self,
        query: TransactionQuery,
    ) -> Result<Vec<InventoryTransaction>, DomainError> {
        self.transactions
            .query(query)
            .await
            .map_err(DomainError::storage("querying transactions"))
    }
}

#[async_trait]
impl<T: TransactionStore, P: ProductStore> StockCalculator for LedgerService<T, P> {
    #[tracing::instrument(skip(self))]
    async fn calculate_stock_for_product(&self, product_id: ProductId) -> Result<i64, DomainError> {
        let started = Instant::now();
        let total = self
            .transactions
            .sum_quantity_by_product(product_id)
            .await
            .map_err(DomainError::storage("summing stock"))?;
        metrics::histogram!("stock_aggregation_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        Ok(total)
    }
}

/// Parses the type tag and applies its sign rule.
fn validate_request(cmd: &CreateTransaction) -> Result<TransactionType, InventoryError> {
    let transaction_type = cmd
        .transaction_type
        .parse::<TransactionType>()
        .map_err(|e| InventoryError::InvalidTransactionType { value: e.value })?;
    transaction_type.validate_quantity_change(cmd.quantity_change)?;
    Ok(transaction_type)
}

fn record_rejection(err: &InventoryError) {
    metrics::counter!("inventory_transactions_rejected_total", "reason" => err.reason_label())
        .increment(1);
    tracing::warn!(error = %err, "inventory transaction rejected");
}
