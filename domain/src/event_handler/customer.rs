use crate::customer::{CustomerAddressChanged, CustomerCreated};
use events::{DomainEvent, Error, EventHandler};
use log::*;
use serde::Serialize;

/// Serializes the payload as the request body sent to the CRM.
fn crm_request_body<T: Serialize>(payload: &T) -> Result<String, Error> {
    serde_json::to_string(payload).map_err(Error::external)
}

/// Pushes newly created customers to the CRM.
pub struct NotifyCrmWhenCustomerIsCreatedHandler;

impl EventHandler for NotifyCrmWhenCustomerIsCreatedHandler {
    type Event = CustomerCreated;

    fn handle(&self, event: &DomainEvent<CustomerCreated>) -> Result<(), Error> {
        let body = crm_request_body(event.data())?;
        info!(
            "Notifying CRM of new customer {} ({})",
            event.data().id,
            event.data().name
        );
        debug!("CRM request body for {}: {}", event.id(), body);
        Ok(())
    }
}

/// Lets partners know a customer was created.
pub struct NotifyPartnerWhenCustomerIsCreatedHandler;

impl EventHandler for NotifyPartnerWhenCustomerIsCreatedHandler {
    type Event = CustomerCreated;

    fn handle(&self, event: &DomainEvent<CustomerCreated>) -> Result<(), Error> {
        info!(
            "Notifying partners of new customer {} at {}",
            event.data().id,
            event.occurred_at().to_rfc3339()
        );
        Ok(())
    }
}

/// Sends the customer's new address to the CRM.
pub struct NotifyCrmWhenCustomerAddressIsChangedHandler;

impl NotifyCrmWhenCustomerAddressIsChangedHandler {
    pub(crate) fn message(event: &DomainEvent<CustomerAddressChanged>) -> String {
        let changed = event.data();
        let address = &changed.address;
        format!(
            "Customer address: {}, {} changed to: {}, {}, {}, {}, {}",
            changed.id,
            changed.name,
            address.street,
            address.number,
            address.city,
            address.state,
            address.country
        )
    }
}

impl EventHandler for NotifyCrmWhenCustomerAddressIsChangedHandler {
    type Event = CustomerAddressChanged;

    fn handle(&self, event: &DomainEvent<CustomerAddressChanged>) -> Result<(), Error> {
        let body = crm_request_body(event.data())?;
        info!("{}", Self::message(event));
        debug!("CRM request body for {}: {}", event.id(), body);
        Ok(())
    }
}
