use chrono::{DateTime, Utc};
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// A catalog entry. Stock is never stored here; it is derived from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a product that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Money,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    pub(crate) fn into_record(self, id: ProductId, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Replacement values for a product's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: String,
    pub description: String,
    pub price: Money,
}

impl ProductChanges {
    pub(crate) fn apply_to(self, product: &mut Product, now: DateTime<Utc>) {
        product.name = self.name;
        product.description = self.description;
        product.price = self.price;
        product.updated_at = now;
    }
}
