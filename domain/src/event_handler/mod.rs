//! Concrete reactions to domain events.
//!
//! Each handler performs one side effect for one payload type. Handlers know
//! nothing about the producers that raise the events they react to.

use crate::customer::{CustomerAddressChanged, CustomerCreated};
use crate::product::ProductCreated;
use events::{EventData, EventDispatcher};
use log::*;
use std::sync::Arc;

pub mod customer;
pub mod product;

pub use customer::{
    NotifyCrmWhenCustomerAddressIsChangedHandler, NotifyCrmWhenCustomerIsCreatedHandler,
    NotifyPartnerWhenCustomerIsCreatedHandler,
};
pub use product::SendEmailWhenProductIsCreatedHandler;

/// The handler instances wired by [`register_default_handlers`], kept so callers
/// can unregister them individually.
pub struct DefaultHandlers {
    pub send_email_when_product_is_created: Arc<SendEmailWhenProductIsCreatedHandler>,
    pub notify_crm_when_customer_is_created: Arc<NotifyCrmWhenCustomerIsCreatedHandler>,
    pub notify_partner_when_customer_is_created: Arc<NotifyPartnerWhenCustomerIsCreatedHandler>,
    pub notify_crm_when_customer_address_is_changed:
        Arc<NotifyCrmWhenCustomerAddressIsChangedHandler>,
}

/// Registers every domain handler under the event type it reacts to.
pub fn register_default_handlers(dispatcher: &EventDispatcher) -> DefaultHandlers {
    let handlers = DefaultHandlers {
        send_email_when_product_is_created: Arc::new(SendEmailWhenProductIsCreatedHandler),
        notify_crm_when_customer_is_created: Arc::new(NotifyCrmWhenCustomerIsCreatedHandler),
        notify_partner_when_customer_is_created: Arc::new(
            NotifyPartnerWhenCustomerIsCreatedHandler,
        ),
        notify_crm_when_customer_address_is_changed: Arc::new(
            NotifyCrmWhenCustomerAddressIsChangedHandler,
        ),
    };

    dispatcher.register(
        ProductCreated::EVENT_TYPE,
        Arc::clone(&handlers.send_email_when_product_is_created),
    );
    dispatcher.register(
        CustomerCreated::EVENT_TYPE,
        Arc::clone(&handlers.notify_crm_when_customer_is_created),
    );
    dispatcher.register(
        CustomerCreated::EVENT_TYPE,
        Arc::clone(&handlers.notify_partner_when_customer_is_created),
    );
    dispatcher.register(
        CustomerAddressChanged::EVENT_TYPE,
        Arc::clone(&handlers.notify_crm_when_customer_address_is_changed),
    );

    info!(
        "Registered default handlers for {} event type(s)",
        dispatcher.event_types().len()
    );

    handlers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::Address;
    use events::{DomainEvent, Error, EventHandler};
    use mockall::{mock, Sequence};

    mock! {
        ProductCreatedHandler {}
        impl EventHandler for ProductCreatedHandler {
            type Event = ProductCreated;
            fn handle(&self, event: &DomainEvent<ProductCreated>) -> Result<(), Error>;
        }
    }

    mock! {
        CustomerCreatedHandler {}
        impl EventHandler for CustomerCreatedHandler {
            type Event = CustomerCreated;
            fn handle(&self, event: &DomainEvent<CustomerCreated>) -> Result<(), Error>;
        }
    }

    mock! {
        AddressChangedHandler {}
        impl EventHandler for AddressChangedHandler {
            type Event = CustomerAddressChanged;
            fn handle(&self, event: &DomainEvent<CustomerAddressChanged>) -> Result<(), Error>;
        }
    }

    fn product_created() -> DomainEvent<ProductCreated> {
        DomainEvent::new(ProductCreated {
            name: "Product 1".to_string(),
            description: "Product 1 description".to_string(),
            price: 10.0,
        })
    }

    #[test]
    fn test_register_default_handlers_wires_every_event_type() {
        let dispatcher = EventDispatcher::new();
        let handlers = register_default_handlers(&dispatcher);

        assert_eq!(
            dispatcher.event_types(),
            vec![
                "CustomerAddressChangedEvent",
                "CustomerCreatedEvent",
                "ProductCreatedEvent"
            ]
        );

        let customer_created = dispatcher.handlers("CustomerCreatedEvent").unwrap();
        assert_eq!(customer_created.len(), 2);
        assert!(customer_created[0].is(&handlers.notify_crm_when_customer_is_created));
        assert!(customer_created[1].is(&handlers.notify_partner_when_customer_is_created));
        assert!(dispatcher.handlers("ProductCreatedEvent").unwrap()[0]
            .is(&handlers.send_email_when_product_is_created));
    }

    #[test]
    fn test_default_handlers_handle_their_events() {
        let dispatcher = EventDispatcher::new();
        register_default_handlers(&dispatcher);

        assert!(dispatcher.notify(&product_created()).is_ok());
        assert!(dispatcher
            .notify(&DomainEvent::new(CustomerCreated {
                id: "123".to_string(),
                name: "Customer 1".to_string(),
            }))
            .is_ok());
    }

    #[test]
    fn test_product_created_reaches_registered_handler_once() {
        let dispatcher = EventDispatcher::new();
        let mut handler = MockProductCreatedHandler::new();
        handler
            .expect_handle()
            .withf(|event| {
                event.data().name == "Product 1"
                    && event.data().description == "Product 1 description"
                    && event.data().price == 10.0
            })
            .times(1)
            .returning(|_| Ok(()));
        let handler = Arc::new(handler);

        dispatcher.register("ProductCreatedEvent", handler.clone());
        assert!(dispatcher.handlers("ProductCreatedEvent").unwrap()[0].is(&handler));

        assert!(dispatcher.notify(&product_created()).is_ok());
    }

    #[test]
    fn test_customer_created_reaches_both_handlers_in_order() {
        let dispatcher = EventDispatcher::new();
        let mut seq = Sequence::new();

        let mut crm = MockCustomerCreatedHandler::new();
        crm.expect_handle()
            .withf(|event| event.data().id == "123" && event.data().name == "Customer 1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        let mut partner = MockCustomerCreatedHandler::new();
        partner
            .expect_handle()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        let crm = Arc::new(crm);
        let partner = Arc::new(partner);

        dispatcher.register("CustomerCreatedEvent", crm.clone());
        dispatcher.register("CustomerCreatedEvent", partner.clone());

        let handlers = dispatcher.handlers("CustomerCreatedEvent").unwrap();
        assert!(handlers.iter().any(|h| h.is(&crm)));
        assert!(handlers.iter().any(|h| h.is(&partner)));

        let event = DomainEvent::new(CustomerCreated {
            id: "123".to_string(),
            name: "Customer 1".to_string(),
        });
        assert!(dispatcher.notify(&event).is_ok());
    }

    #[test]
    fn test_unregistered_product_handler_is_not_invoked() {
        let dispatcher = EventDispatcher::new();
        let mut handler = MockProductCreatedHandler::new();
        handler.expect_handle().never();
        let handler = Arc::new(handler);

        dispatcher.register("ProductCreatedEvent", handler.clone());
        dispatcher.unregister("ProductCreatedEvent", &handler);

        assert!(dispatcher.notify(&product_created()).is_ok());
        assert_eq!(
            dispatcher.handlers("ProductCreatedEvent").map(|h| h.len()),
            Some(0)
        );
    }

    #[test]
    fn test_unregister_all_leaves_event_type_absent() {
        let dispatcher = EventDispatcher::new();
        let handler = Arc::new(SendEmailWhenProductIsCreatedHandler);

        dispatcher.register("ProductCreatedEvent", handler.clone());
        assert!(dispatcher.handlers("ProductCreatedEvent").unwrap()[0].is(&handler));

        dispatcher.unregister_all();

        assert!(dispatcher.handlers("ProductCreatedEvent").is_none());
    }

    #[test]
    fn test_address_changed_handler_receives_nested_address_unmodified() {
        let dispatcher = EventDispatcher::new();
        let address = Address {
            street: "New Street".to_string(),
            number: "2".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            country: "Brasil".to_string(),
        };
        let expected = address.clone();

        let mut handler = MockAddressChangedHandler::new();
        handler
            .expect_handle()
            .withf(move |event| {
                event.data().id == "123"
                    && event.data().name == "Customer 1"
                    && event.data().address == expected
            })
            .times(1)
            .returning(|_| Ok(()));
        let handler = Arc::new(handler);
        dispatcher.register("CustomerAddressChangedEvent", handler.clone());
        assert!(dispatcher.handlers("CustomerAddressChangedEvent").unwrap()[0].is(&handler));

        let event = DomainEvent::new(CustomerAddressChanged {
            id: "123".to_string(),
            name: "Customer 1".to_string(),
            address,
        });
        assert!(dispatcher.notify(&event).is_ok());
    }
}
