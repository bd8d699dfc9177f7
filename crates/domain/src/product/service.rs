//! Product service composing catalog records with derived stock.

use common::ProductId;
use inventory_store::{Product, ProductStore};

use super::{CreateProduct, ProductError, ProductView, UpdateProduct};
use crate::error::DomainError;
use crate::inventory::StockCalculator;

/// Service for product CRUD and stock-enriched reads.
///
/// Every view's `quantity` comes from the stock calculator at read time;
/// no quantity is ever stored on the product.
pub struct ProductService<P: ProductStore, C: StockCalculator> {
    products: P,
    stock: C,
}

impl<P: ProductStore, C: StockCalculator> ProductService<P, C> {
    /// Creates a new product service.
    pub fn new(products: P, stock: C) -> Self {
        Self { products, stock }
    }

    async fn view(&self, product: Product) -> Result<ProductView, DomainError> {
        let quantity = self.stock.calculate_stock_for_product(product.id).await?;
        Ok(ProductView::new(product, quantity))
    }

    /// Loads a product with its current stock.
    #[tracing::instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: ProductId) -> Result<ProductView, DomainError> {
        let product = self
            .products
            .find_by_id(id)
            .await
            .map_err(DomainError::storage("loading product"))?
            .ok_or(ProductError::NotFound(id))?;

        self.view(product).await
    }

    /// Loads every product with its current stock.
    ///
    /// If stock cannot be derived for any product the whole read fails;
    /// a partial list is never returned.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_products(&self) -> Result<Vec<ProductView>, DomainError> {
        let products = self
            .products
            .find_all()
            .await
            .map_err(DomainError::storage("listing products"))?;

        let mut views = Vec::with_capacity(products.len());
        for product in products {
            views.push(self.view(product).await?);
        }
        Ok(views)
    }

    /// Adds a product to the catalog.
    #[tracing::instrument(skip(self))]
    pub async fn create_product(&self, cmd: CreateProduct) -> Result<ProductView, DomainError> {
        let new_product = cmd.validate()?;
        let product = self
            .products
            .create(new_product)
            .await
            .map_err(DomainError::storage("creating product"))?;
        tracing::info!(product_id = %product.id, "product created");

        self.view(product).await
    }

    /// Replaces a product's editable fields.
    #[tracing::instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        cmd: UpdateProduct,
    ) -> Result<ProductView, DomainError> {
        let changes = cmd.validate()?;
        let product = self
            .products
            .update(id, changes)
            .await
            .map_err(DomainError::storage("updating product"))?
            .ok_or(ProductError::NotFound(id))?;

        self.view(product).await
    }

    /// Removes a product from the catalog.
    ///
    /// Its ledger entries are kept for audit.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), DomainError> {
        let deleted = self
            .products
            .delete(id)
            .await
            .map_err(DomainError::storage("deleting product"))?;
        if !deleted {
            return Err(ProductError::NotFound(id).into());
        }
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use common::Money;
    use inventory_store::{InMemoryProductStore, StoreError};

    use super::*;

    /// Stock calculator returning a fixed quantity per product id.
    struct FixedStock;

    #[async_trait]
    impl StockCalculator for FixedStock {
        async fn calculate_stock_for_product(
            &self,
            product_id: ProductId,
        ) -> Result<i64, DomainError> {
            Ok(product_id.as_i64() * 10)
        }
    }

    /// Stock calculator that fails for one product id.
    struct FailingFor(ProductId);

    #[async_trait]
    impl StockCalculator for FailingFor {
        async fn calculate_stock_for_product(
            &self,
            product_id: ProductId,
        ) -> Result<i64, DomainError> {
            if product_id == self.0 {
                return Err(DomainError::storage("summing stock")(
                    StoreError::Database(sqlx::Error::PoolTimedOut),
                ));
            }
            Ok(0)
        }
    }

    async fn seed(store: &InMemoryProductStore, names: &[&str]) {
        for name in names {
            store
                .create(inventory_store::NewProduct::new(
                    *name,
                    "",
                    Money::from_cents(100),
                ))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_get_product_merges_quantity() {
        let store = InMemoryProductStore::new();
        seed(&store, &["Widget", "Gadget"]).await;
        let service = ProductService::new(store, FixedStock);

        let view = service.get_product_by_id(ProductId::new(2)).await.unwrap();
        assert_eq!(view.name, "Gadget");
        assert_eq!(view.quantity, 20);
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let service = ProductService::new(InMemoryProductStore::new(), FixedStock);

        let err = service
            .get_product_by_id(ProductId::new(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Product(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_all_fails_whole_batch() {
        let store = InMemoryProductStore::new();
        seed(&store, &["a", "b", "c"]).await;
        let service = ProductService::new(store, FailingFor(ProductId::new(2)));

        let err = service.get_all_products().await.unwrap_err();
        assert!(matches!(err, DomainError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_get_all_single_failure_does_not_affect_single_reads() {
        let store = InMemoryProductStore::new();
        seed(&store, &["a", "b"]).await;
        let service = ProductService::new(store, FailingFor(ProductId::new(2)));

        assert!(service.get_product_by_id(ProductId::new(1)).await.is_ok());
        assert!(service.get_product_by_id(ProductId::new(2)).await.is_err());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_product() {
        let service = ProductService::new(InMemoryProductStore::new(), FixedStock);

        let err = service
            .create_product(CreateProduct::new("", "", Money::from_cents(100)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Product(ProductError::NameRequired)
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_product() {
        let service = ProductService::new(InMemoryProductStore::new(), FixedStock);

        let err = service
            .update_product(
                ProductId::new(5),
                UpdateProduct::new("Widget", "", Money::from_cents(100)),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Product(ProductError::NotFound(_))
        ));

        let err = service.delete_product(ProductId::new(5)).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Product(ProductError::NotFound(_))
        ));
    }
}
