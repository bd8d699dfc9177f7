//! Storage layer for the inventory ledger.
//!
//! Provides two stores behind async traits:
//! - [`TransactionStore`]: the append-only ledger of stock movements, with
//!   per-product listing and quantity summation
//! - [`ProductStore`]: the product catalog the ledger refers to
//!
//! Each has an in-memory implementation for tests and local runs and a
//! PostgreSQL implementation built on sqlx.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod product;
pub mod query;
pub mod store;
pub mod transaction;

pub use error::{Result, StoreError};
pub use memory::{InMemoryProductStore, InMemoryTransactionStore};
pub use postgres::{PostgresProductStore, PostgresTransactionStore, run_migrations};
pub use product::{NewProduct, Product, ProductChanges};
pub use query::TransactionQuery;
pub use store::{ProductStore, ProductStoreExt, TransactionStore};
pub use transaction::{
    InventoryTransaction, NewTransaction, ParseTransactionTypeError, TransactionType,
};
