use crate::error::Error;
use crate::notifier::Notifier;
use events::{DomainEvent, EventData, Id};
use log::*;
use serde::Serialize;
use uuid::Uuid;

/// Payload of the event raised when a product is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCreated {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl EventData for ProductCreated {
    const EVENT_TYPE: &'static str = "ProductCreatedEvent";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: Id,
    name: String,
    description: String,
    price: f64,
}

impl Product {
    /// Creates a product and notifies `ProductCreatedEvent` handlers.
    ///
    /// Fails before any event is raised when the name is blank or the price is
    /// negative or not a finite number.
    pub fn create(
        notifier: &impl Notifier,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Result<Product, Error> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::missing_field("name"));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(Error::invalid_price());
        }

        let product = Product {
            id: Uuid::new_v4(),
            name,
            description: description.into(),
            price,
        };
        debug!("Created product {} ({})", product.id, product.name);

        notifier.raise(&DomainEvent::new(ProductCreated {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
        }))?;

        Ok(product)
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}
