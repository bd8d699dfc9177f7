//! Product commands.

use common::Money;
use inventory_store::{NewProduct, ProductChanges};

use super::ProductError;

fn validate(name: &str, price: Money) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::NameRequired);
    }
    if !price.is_positive() {
        return Err(ProductError::InvalidPrice { price });
    }
    Ok(())
}

/// Command to add a product to the catalog.
///
/// Products start with no ledger entries, so their stock is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price: Money,
}

impl CreateProduct {
    /// Creates a new CreateProduct command.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    pub(crate) fn validate(self) -> Result<NewProduct, ProductError> {
        validate(&self.name, self.price)?;
        Ok(NewProduct::new(self.name.trim(), self.description, self.price))
    }
}

/// Command to replace a product's name, description and price.
///
/// Stock cannot be changed here; it only moves through the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProduct {
    pub name: String,
    pub description: String,
    pub price: Money,
}

impl UpdateProduct {
    /// Creates a new UpdateProduct command.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    pub(crate) fn validate(self) -> Result<ProductChanges, ProductError> {
        validate(&self.name, self.price)?;
        Ok(ProductChanges {
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
        })
    }
}
