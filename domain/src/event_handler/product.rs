use crate::product::ProductCreated;
use events::{DomainEvent, Error, EventHandler};
use log::*;

/// Sends the "new product" email when a product is created.
pub struct SendEmailWhenProductIsCreatedHandler;

impl SendEmailWhenProductIsCreatedHandler {
    pub(crate) fn message(event: &DomainEvent<ProductCreated>) -> String {
        let product = event.data();
        format!(
            "New product available: {} ({:.2}) - {}",
            product.name, product.price, product.description
        )
    }
}

impl EventHandler for SendEmailWhenProductIsCreatedHandler {
    type Event = ProductCreated;

    fn handle(&self, event: &DomainEvent<ProductCreated>) -> Result<(), Error> {
        info!(
            "Sending product email for {} {}: {}",
            event.event_type(),
            event.id(),
            Self::message(event)
        );
        Ok(())
    }
}
