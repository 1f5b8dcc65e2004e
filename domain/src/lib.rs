//! Domain layer: the entities that raise domain events and the handlers that react to them.
//!
//! Producers (`Product::create`, `Customer::create`, `Customer::change_address`)
//! receive the `Notifier` they raise events through as an argument, so every caller
//! decides which dispatcher an operation reaches and whether a failing handler
//! stops the others.
pub use events::{DomainEvent, EventData, EventDispatcher};

pub mod customer;
pub mod error;
pub mod event_handler;
pub mod notifier;
pub mod product;

pub use event_handler::{register_default_handlers, DefaultHandlers};
pub use notifier::{Isolated, Notifier};
