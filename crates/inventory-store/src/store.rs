use async_trait::async_trait;
use common::ProductId;

use crate::{
    InventoryTransaction, NewProduct, NewTransaction, Product, ProductChanges, Result,
    TransactionQuery,
};

/// Append-only storage for the inventory ledger.
///
/// There is no update or delete operation: once appended, an entry is part
/// of the ledger forever. All implementations must be thread-safe
/// (Send + Sync).
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Appends a single entry in one write.
    ///
    /// Returns the stored record with its assigned id and creation time.
    /// On error nothing has been written.
    async fn append(&self, transaction: NewTransaction) -> Result<InventoryTransaction>;

    /// Retrieves all entries for a product, newest first.
    async fn list_by_product(&self, product_id: ProductId) -> Result<Vec<InventoryTransaction>>;

    /// Sums `quantity_change` over all entries for a product.
    ///
    /// Returns 0 when the product has no entries.
    async fn sum_quantity_by_product(&self, product_id: ProductId) -> Result<i64>;

    /// Retrieves entries matching a query, newest first.
    async fn query(&self, query: TransactionQuery) -> Result<Vec<InventoryTransaction>>;
}

/// Storage for product catalog records.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Retrieves a product by id. Returns None if it doesn't exist.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    /// Retrieves all products ordered by id.
    async fn find_all(&self) -> Result<Vec<Product>>;

    /// Saves a new product and returns it with its assigned id.
    async fn create(&self, product: NewProduct) -> Result<Product>;

    /// Replaces a product's editable fields. Returns None if it doesn't exist.
    async fn update(&self, id: ProductId, changes: ProductChanges) -> Result<Option<Product>>;

    /// Removes a product. Returns false if it didn't exist.
    ///
    /// Ledger entries referencing the product are left untouched.
    async fn delete(&self, id: ProductId) -> Result<bool>;
}

/// Extension trait providing convenience methods for product stores.
#[async_trait]
pub trait ProductStoreExt: ProductStore {
    /// Checks if a product exists.
    async fn product_exists(&self, id: ProductId) -> Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

// Blanket implementation for all ProductStore implementations
impl<T: ProductStore + ?Sized> ProductStoreExt for T {}
