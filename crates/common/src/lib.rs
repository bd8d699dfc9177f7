//! Identifier newtypes and value objects shared across the inventory crates.

mod money;
mod types;

pub use money::Money;
pub use types::{ProductId, TransactionId, UserId};
