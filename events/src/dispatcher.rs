use crate::error::Error;
use crate::event::{DomainEvent, EventData};
use crate::handler::{EventHandler, RegisteredHandler};
use dashmap::DashMap;
use log::*;
use std::sync::Arc;

/// Dispatches domain events to the handlers registered for their event type.
///
/// The registry maps an event-type identifier to the handlers registered under it,
/// in registration order. Each sequence is stored behind an `Arc` and replaced
/// copy-on-write, so `notify` works on a snapshot taken when it starts: a
/// `register`/`unregister` racing with (or issued from inside) a dispatch never
/// changes which handlers that dispatch invokes.
///
/// Construct one per application (or per test) and share it by reference or `Arc`.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: DashMap<String, Arc<Vec<RegisteredHandler>>>,
}

/// A handler that failed during [`EventDispatcher::notify_isolated`].
#[derive(Debug)]
pub struct HandlerFailure {
    pub handler: &'static str,
    pub error: Error,
}

/// Outcome of an isolated dispatch.
#[derive(Debug)]
pub struct DispatchReport {
    pub event_type: &'static str,
    /// Number of handler invocations, failed ones included.
    pub invoked: usize,
    pub failures: Vec<HandlerFailure>,
}

impl DispatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `handler` to the handlers for `event_type`, creating the entry if needed.
    ///
    /// Any identifier is accepted, and registering the same handler twice means it
    /// is invoked twice per event.
    pub fn register<H>(&self, event_type: impl Into<String>, handler: Arc<H>)
    where
        H: EventHandler + ?Sized + 'static,
    {
        let event_type = event_type.into();
        let registered = RegisteredHandler::new(handler);
        debug!("Registering {} for {}", registered.name(), event_type);

        let mut entry = self.handlers.entry(event_type).or_default();
        Arc::make_mut(entry.value_mut()).push(registered);
    }

    /// Removes every registration of `handler` (compared by identity) under `event_type`.
    ///
    /// The entry for `event_type` stays in place even if it ends up empty. Unknown
    /// types and unregistered handlers are ignored.
    pub fn unregister<H: ?Sized>(&self, event_type: &str, handler: &Arc<H>) {
        // Removed registrations are dropped only after the shard guard is released,
        // so a handler whose `Drop` calls back into the dispatcher cannot deadlock.
        let removed = {
            let Some(mut entry) = self.handlers.get_mut(event_type) else {
                return;
            };
            if !entry.iter().any(|registered| registered.is(handler)) {
                return;
            }

            let kept: Vec<RegisteredHandler> = entry
                .iter()
                .filter(|registered| !registered.is(handler))
                .cloned()
                .collect();
            std::mem::replace(entry.value_mut(), Arc::new(kept))
        };

        debug!(
            "Unregistered {} handler registration(s) for {}",
            removed.iter().filter(|registered| registered.is(handler)).count(),
            event_type
        );
        drop(removed);
    }

    /// Drops every registration, returning the dispatcher to its initial state.
    pub fn unregister_all(&self) {
        let mut removed = Vec::with_capacity(self.handlers.len());
        self.handlers.retain(|_, handlers| {
            removed.push(std::mem::take(handlers));
            false
        });

        debug!(
            "Cleared handler registrations for {} event type(s)",
            removed.len()
        );
        drop(removed);
    }

    /// Invokes every handler registered for the event's type, in registration order.
    ///
    /// Handlers run one after another on the calling thread, each receiving the same
    /// event. The first handler error is returned immediately and the remaining
    /// handlers are skipped. An event type nobody registered for is not an error.
    pub fn notify<T: EventData>(&self, event: &DomainEvent<T>) -> Result<(), Error> {
        let Some(handlers) = self.snapshot(event.event_type()) else {
            trace!("No handlers registered for {}", event.event_type());
            return Ok(());
        };

        for handler in handlers.iter() {
            trace!(
                "Invoking {} for {} {}",
                handler.name(),
                event.event_type(),
                event.id()
            );
            handler.invoke(event)?;
        }

        Ok(())
    }

    /// Like [`notify`](Self::notify), but keeps going when a handler fails and
    /// reports every failure instead of returning the first one.
    pub fn notify_isolated<T: EventData>(&self, event: &DomainEvent<T>) -> DispatchReport {
        let mut report = DispatchReport {
            event_type: event.event_type(),
            invoked: 0,
            failures: Vec::new(),
        };

        let Some(handlers) = self.snapshot(event.event_type()) else {
            trace!("No handlers registered for {}", event.event_type());
            return report;
        };

        for handler in handlers.iter() {
            trace!(
                "Invoking {} for {} {}",
                handler.name(),
                event.event_type(),
                event.id()
            );
            report.invoked += 1;
            if let Err(error) = handler.invoke(event) {
                report.failures.push(HandlerFailure {
                    handler: handler.name(),
                    error,
                });
            }
        }

        report
    }

    /// Returns a copy of the handlers registered under `event_type`.
    ///
    /// `None` means nothing was ever registered for the type (or the registry was
    /// cleared since); `Some` with an empty list means every handler was unregistered.
    pub fn handlers(&self, event_type: &str) -> Option<Vec<RegisteredHandler>> {
        self.snapshot(event_type)
            .map(|handlers| (*handlers).clone())
    }

    /// Event types currently present in the registry, sorted.
    pub fn event_types(&self) -> Vec<String> {
        let mut event_types: Vec<String> = self
            .handlers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        event_types.sort();
        event_types
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    // The map guard is released before returning, so handlers are never invoked
    // while a shard lock is held.
    fn snapshot(&self, event_type: &str) -> Option<Arc<Vec<RegisteredHandler>>> {
        self.handlers
            .get(event_type)
            .map(|entry| Arc::clone(entry.value()))
    }
}
