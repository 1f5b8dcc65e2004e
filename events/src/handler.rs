use crate::error::Error;
use crate::event::{DomainEvent, EventData};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Trait for handling domain events.
/// Implementations can perform side effects like sending notifications,
/// calling partner systems, logging, etc.
///
/// A handler reacts to exactly one payload type. Returning an error stops the
/// dispatch that invoked it; see [`EventDispatcher::notify`](crate::EventDispatcher::notify).
pub trait EventHandler: Send + Sync {
    type Event: EventData;

    fn handle(&self, event: &DomainEvent<Self::Event>) -> Result<(), Error>;
}

/// Object-safe view of a handler with its payload type erased, so handlers for
/// different payloads can share one registry.
trait ErasedHandler: Send + Sync {
    fn handle_any(
        &self,
        event_type: &str,
        event: &dyn Any,
        payload_name: &'static str,
    ) -> Result<(), Error>;

    fn name(&self) -> &'static str;

    fn addr(&self) -> *const ();
}

struct Typed<H: ?Sized> {
    handler: Arc<H>,
}

impl<H> ErasedHandler for Typed<H>
where
    H: EventHandler + ?Sized + 'static,
{
    fn handle_any(
        &self,
        event_type: &str,
        event: &dyn Any,
        payload_name: &'static str,
    ) -> Result<(), Error> {
        match event.downcast_ref::<DomainEvent<H::Event>>() {
            Some(event) => self.handler.handle(event),
            None => Err(Error::payload_mismatch(
                event_type,
                type_name::<H::Event>(),
                payload_name,
            )),
        }
    }

    fn name(&self) -> &'static str {
        type_name::<H>()
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.handler) as *const ()
    }
}

/// A handler reference as stored in the registry.
///
/// Cloning is cheap and shares the underlying handler. Two entries are the same
/// handler only when they point at the same allocation.
#[derive(Clone)]
pub struct RegisteredHandler {
    inner: Arc<dyn ErasedHandler>,
}

impl RegisteredHandler {
    pub(crate) fn new<H>(handler: Arc<H>) -> Self
    where
        H: EventHandler + ?Sized + 'static,
    {
        Self {
            inner: Arc::new(Typed { handler }),
        }
    }

    /// Type name of the handler, used in logs and failure reports.
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Returns true if this entry refers to the very same handler instance.
    pub fn is<H: ?Sized>(&self, handler: &Arc<H>) -> bool {
        std::ptr::eq(self.inner.addr(), Arc::as_ptr(handler) as *const ())
    }

    pub(crate) fn same_handler(&self, other: &RegisteredHandler) -> bool {
        std::ptr::eq(self.inner.addr(), other.inner.addr())
    }

    pub(crate) fn invoke<T: EventData>(&self, event: &DomainEvent<T>) -> Result<(), Error> {
        self.inner
            .handle_any(event.event_type(), event, type_name::<T>())
    }
}

impl fmt::Debug for RegisteredHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredHandler")
            .field("name", &self.name())
            .field("addr", &self.inner.addr())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DispatchErrorKind, ErrorKind};

    #[derive(Debug)]
    struct Opened;

    impl EventData for Opened {
        const EVENT_TYPE: &'static str = "OpenedEvent";
    }

    #[derive(Debug)]
    struct Closed;

    impl EventData for Closed {
        const EVENT_TYPE: &'static str = "ClosedEvent";
    }

    struct OnOpened;

    impl EventHandler for OnOpened {
        type Event = Opened;

        fn handle(&self, _event: &DomainEvent<Opened>) -> Result<(), Error> {
            Ok(())
        }
    }

    #[test]
    fn test_identity_is_per_instance() {
        let first = Arc::new(OnOpened);
        let second = Arc::new(OnOpened);
        let registered = RegisteredHandler::new(Arc::clone(&first));

        assert!(registered.is(&first));
        assert!(!registered.is(&second));
        assert!(registered.same_handler(&registered.clone()));
        assert!(!registered.same_handler(&RegisteredHandler::new(second)));
    }

    #[test]
    fn test_identity_survives_trait_object_coercion() {
        let handler = Arc::new(OnOpened);
        let as_dyn: Arc<dyn EventHandler<Event = Opened>> = handler.clone();
        let registered = RegisteredHandler::new(as_dyn);

        assert!(registered.is(&handler));
    }

    #[test]
    fn test_name_reports_handler_type() {
        let registered = RegisteredHandler::new(Arc::new(OnOpened));

        assert!(registered.name().ends_with("OnOpened"));
    }

    #[test]
    fn test_invoke_with_foreign_payload_is_a_mismatch() {
        let registered = RegisteredHandler::new(Arc::new(OnOpened));
        let err = registered.invoke(&DomainEvent::new(Closed)).unwrap_err();

        match err.error_kind {
            ErrorKind::Dispatch(DispatchErrorKind::PayloadMismatch {
                event_type,
                expected,
                actual,
            }) => {
                assert_eq!(event_type, "ClosedEvent");
                assert!(expected.ends_with("Opened"));
                assert!(actual.ends_with("Closed"));
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_invoke_with_matching_payload_calls_handler() {
        let registered = RegisteredHandler::new(Arc::new(OnOpened));

        assert!(registered.invoke(&DomainEvent::new(Opened)).is_ok());
    }
}
