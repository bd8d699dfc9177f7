//! Domain layer for the inventory ledger.
//!
//! This crate provides:
//! - the sign-rule table for each transaction type
//! - `LedgerService`, the only writer to the transaction store
//! - the `StockCalculator` capability deriving stock from the ledger
//! - `ProductService`, which merges derived stock into product reads

pub mod error;
pub mod identity;
pub mod inventory;
pub mod product;

pub use error::DomainError;
pub use identity::CallerIdentity;
pub use inventory::{CreateTransaction, InventoryError, LedgerService, SignRule, StockCalculator};
pub use product::{CreateProduct, ProductError, ProductService, ProductView, UpdateProduct};
