use crate::error::Error;
use crate::notifier::Notifier;
use events::{DomainEvent, EventData};
use log::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Address {
    fn validate(&self) -> Result<(), Error> {
        if self.street.trim().is_empty() {
            return Err(Error::missing_field("street"));
        }
        if self.city.trim().is_empty() {
            return Err(Error::missing_field("city"));
        }
        if self.country.trim().is_empty() {
            return Err(Error::missing_field("country"));
        }
        Ok(())
    }
}

/// Payload of the event raised when a customer is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerCreated {
    pub id: String,
    pub name: String,
}

impl EventData for CustomerCreated {
    const EVENT_TYPE: &'static str = "CustomerCreatedEvent";
}

/// Payload of the event raised when a customer moves to a new address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerAddressChanged {
    pub id: String,
    pub name: String,
    pub address: Address,
}

impl EventData for CustomerAddressChanged {
    const EVENT_TYPE: &'static str = "CustomerAddressChangedEvent";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    id: String,
    name: String,
    address: Option<Address>,
}

impl Customer {
    /// Creates a customer without an address and notifies `CustomerCreatedEvent` handlers.
    pub fn create(
        notifier: &impl Notifier,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Customer, Error> {
        let id = id.into();
        let name = name.into();
        if id.trim().is_empty() {
            return Err(Error::missing_field("id"));
        }
        if name.trim().is_empty() {
            return Err(Error::missing_field("name"));
        }

        let customer = Customer {
            id,
            name,
            address: None,
        };
        debug!("Created customer {}", customer.id);

        notifier.raise(&DomainEvent::new(CustomerCreated {
            id: customer.id.clone(),
            name: customer.name.clone(),
        }))?;

        Ok(customer)
    }

    /// Moves the customer to `address` and notifies `CustomerAddressChangedEvent` handlers.
    ///
    /// The new address is kept even if a handler fails; the handler's error is
    /// still returned to the caller.
    pub fn change_address(
        &mut self,
        notifier: &impl Notifier,
        address: Address,
    ) -> Result<(), Error> {
        address.validate()?;
        self.address = Some(address.clone());
        debug!("Changed address of customer {}", self.id);

        notifier.raise(&DomainEvent::new(CustomerAddressChanged {
            id: self.id.clone(),
            name: self.name.clone(),
            address,
        }))?;

        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }
}
