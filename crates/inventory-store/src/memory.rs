use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{ProductId, TransactionId};
use tokio::sync::RwLock;

use crate::{
    InventoryTransaction, NewProduct, NewTransaction, Product, ProductChanges, Result,
    TransactionQuery,
    store::{ProductStore, TransactionStore},
};

#[derive(Default)]
struct Ledger {
    entries: Vec<InventoryTransaction>,
    last_id: i64,
}

/// In-memory ledger implementation.
///
/// Provides the same interface as the PostgreSQL implementation. Entries
/// are kept in append order and ids are handed out from a counter guarded
/// by the same lock, so ids increase strictly with append order.
#[derive(Clone, Default)]
pub struct InMemoryTransactionStore {
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryTransactionStore {
    /// Creates a new empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of entries stored.
    pub async fn transaction_count(&self) -> usize {
        self.ledger.read().await.entries.len()
    }
}

fn newest_first(entries: &mut [InventoryTransaction]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn append(&self, transaction: NewTransaction) -> Result<InventoryTransaction> {
        let mut ledger = self.ledger.write().await;
        ledger.last_id += 1;
        let record = transaction.into_record(TransactionId::new(ledger.last_id), Utc::now());
        ledger.entries.push(record.clone());
        Ok(record)
    }

    async fn list_by_product(&self, product_id: ProductId) -> Result<Vec<InventoryTransaction>> {
        let ledger = self.ledger.read().await;
        let mut entries: Vec<_> = ledger
            .entries
            .iter()
            .filter(|t| t.product_id == product_id)
            .cloned()
            .collect();
        newest_first(&mut entries);
        Ok(entries)
    }

    async fn sum_quantity_by_product(&self, product_id: ProductId) -> Result<i64> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .entries
            .iter()
            .filter(|t| t.product_id == product_id)
            .map(|t| i64::from(t.quantity_change))
            .sum())
    }

    async fn query(&self, query: TransactionQuery) -> Result<Vec<InventoryTransaction>> {
        let ledger = self.ledger.read().await;
        let mut entries: Vec<_> = ledger
            .entries
            .iter()
            .filter(|t| query.matches(t))
            .cloned()
            .collect();
        newest_first(&mut entries);

        // Apply offset and limit
        let entries = entries.into_iter().skip(query.offset.unwrap_or(0));
        Ok(match query.limit {
            Some(limit) => entries.take(limit).collect(),
            None => entries.collect(),
        })
    }
}

#[derive(Default)]
struct Catalog {
    products: BTreeMap<ProductId, Product>,
    last_id: i64,
}

/// In-memory product catalog.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    catalog: Arc<RwLock<Catalog>>,
}

impl InMemoryProductStore {
    /// Creates a new empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.catalog.read().await.products.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.catalog.read().await.products.values().cloned().collect())
    }

    async fn create(&self, product: NewProduct) -> Result<Product> {
        let mut catalog = self.catalog.write().await;
        catalog.last_id += 1;
        let id = ProductId::new(catalog.last_id);
        let record = product.into_record(id, Utc::now());
        catalog.products.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: ProductId, changes: ProductChanges) -> Result<Option<Product>> {
        let mut catalog = self.catalog.write().await;
        Ok(catalog.products.get_mut(&id).map(|product| {
            changes.apply_to(product, Utc::now());
            product.clone()
        }))
    }

    async fn delete(&self, id: ProductId) -> Result<bool> {
        Ok(self.catalog.write().await.products.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use common::{Money, UserId};

    use super::*;
    use crate::TransactionType;
    use crate::store::ProductStoreExt;

    fn entry(product: i64, transaction_type: TransactionType, qty: i32) -> NewTransaction {
        NewTransaction::new(ProductId::new(product), UserId::new(1), transaction_type, qty)
    }

    #[tokio::test]
    async fn append_assigns_increasing_ids() {
        let store = InMemoryTransactionStore::new();

        let first = store
            .append(entry(1, TransactionType::StockIn, 10))
            .await
            .unwrap();
        let second = store
            .append(entry(1, TransactionType::StockOut, -4))
            .await
            .unwrap();

        assert_eq!(first.id, TransactionId::new(1));
        assert_eq!(second.id, TransactionId::new(2));
        assert!(second.created_at >= first.created_at);
        assert_eq!(store.transaction_count().await, 2);
    }

    #[tokio::test]
    async fn sum_is_zero_without_entries() {
        let store = InMemoryTransactionStore::new();
        let sum = store
            .sum_quantity_by_product(ProductId::new(42))
            .await
            .unwrap();
        assert_eq!(sum, 0);
    }

    #[tokio::test]
    async fn sum_only_counts_the_requested_product() {
        let store = InMemoryTransactionStore::new();
        store
            .append(entry(1, TransactionType::StockIn, 10))
            .await
            .unwrap();
        store
            .append(entry(2, TransactionType::StockIn, 99))
            .await
            .unwrap();
        store
            .append(entry(1, TransactionType::Adjustment, -3))
            .await
            .unwrap();

        assert_eq!(
            store.sum_quantity_by_product(ProductId::new(1)).await.unwrap(),
            7
        );
        assert_eq!(
            store.sum_quantity_by_product(ProductId::new(2)).await.unwrap(),
            99
        );
    }

    #[tokio::test]
    async fn sum_does_not_overflow_i32() {
        let store = InMemoryTransactionStore::new();
        for _ in 0..3 {
            store
                .append(entry(1, TransactionType::StockIn, i32::MAX))
                .await
                .unwrap();
        }

        let sum = store.sum_quantity_by_product(ProductId::new(1)).await.unwrap();
        assert_eq!(sum, 3 * i64::from(i32::MAX));
    }

    #[tokio::test]
    async fn list_by_product_is_newest_first() {
        let store = InMemoryTransactionStore::new();
        for qty in [1, 2, 3] {
            store
                .append(entry(1, TransactionType::StockIn, qty))
                .await
                .unwrap();
        }
        store
            .append(entry(2, TransactionType::StockIn, 50))
            .await
            .unwrap();

        let entries = store.list_by_product(ProductId::new(1)).await.unwrap();
        let quantities: Vec<_> = entries.iter().map(|t| t.quantity_change).collect();
        assert_eq!(quantities, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn query_applies_filters_then_paging() {
        let store = InMemoryTransactionStore::new();
        for qty in 1..=5 {
            store
                .append(entry(1, TransactionType::StockIn, qty))
                .await
                .unwrap();
        }
        store
            .append(entry(1, TransactionType::StockOut, -1))
            .await
            .unwrap();

        let query = TransactionQuery::for_product(ProductId::new(1))
            .transaction_type(TransactionType::StockIn)
            .offset(1)
            .limit(2);
        let page = store.query(query).await.unwrap();

        let quantities: Vec<_> = page.iter().map(|t| t.quantity_change).collect();
        assert_eq!(quantities, vec![4, 3]);
    }

    #[tokio::test]
    async fn reads_do_not_change_the_ledger() {
        let store = InMemoryTransactionStore::new();
        store
            .append(entry(1, TransactionType::StockIn, 8))
            .await
            .unwrap();

        let first = store.sum_quantity_by_product(ProductId::new(1)).await.unwrap();
        store.list_by_product(ProductId::new(1)).await.unwrap();
        store.query(TransactionQuery::new()).await.unwrap();
        let second = store.sum_quantity_by_product(ProductId::new(1)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.transaction_count().await, 1);
    }

    #[tokio::test]
    async fn product_crud() {
        let store = InMemoryProductStore::new();

        let created = store
            .create(NewProduct::new("Widget", "A widget", Money::from_cents(1999)))
            .await
            .unwrap();
        assert_eq!(created.id, ProductId::new(1));
        assert!(store.product_exists(created.id).await.unwrap());

        let updated = store
            .update(
                created.id,
                ProductChanges {
                    name: "Widget v2".to_string(),
                    description: String::new(),
                    price: Money::from_cents(2499),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Widget v2");
        assert_eq!(updated.price, Money::from_cents(2499));
        assert_eq!(updated.created_at, created.created_at);

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert!(!store.product_exists(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_missing_product_returns_none() {
        let store = InMemoryProductStore::new();
        let result = store
            .update(
                ProductId::new(9),
                ProductChanges {
                    name: "Ghost".to_string(),
                    description: String::new(),
                    price: Money::from_cents(100),
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_id() {
        let store = InMemoryProductStore::new();
        for name in ["a", "b", "c"] {
            store
                .create(NewProduct::new(name, "", Money::from_cents(100)))
                .await
                .unwrap();
        }

        let ids: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.as_i64())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
