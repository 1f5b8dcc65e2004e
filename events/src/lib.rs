//! In-process domain event dispatch.
//!
//! This crate provides the event system that decouples the code deciding that
//! something happened from the code reacting to it (notifications, partner and
//! CRM calls, logging).
//!
//! # Architecture
//!
//! - **DomainEvent**: immutable record of an occurrence, generic over its payload
//! - **EventData**: implemented by each payload type; names the event type
//! - **EventHandler**: trait for implementing side-effecting reactions to one payload type
//! - **EventDispatcher**: registry of handlers per event type, with synchronous fan-out
//!
//! This crate has no dependencies on other workspace crates. Concrete payloads and
//! handlers live in the `domain` crate.
//!
//! # Example
//!
//! ```rust,ignore
//! let dispatcher = EventDispatcher::new();
//! let handler = Arc::new(SendEmailWhenProductIsCreatedHandler);
//!
//! dispatcher.register(ProductCreated::EVENT_TYPE, handler.clone());
//! dispatcher.notify(&DomainEvent::new(ProductCreated { .. }))?;
//! ```

pub mod dispatcher;
pub mod error;
pub mod event;
pub mod handler;

pub use dispatcher::{DispatchReport, EventDispatcher, HandlerFailure};
pub use error::Error;
pub use event::{DomainEvent, EventData, Id};
pub use handler::{EventHandler, RegisteredHandler};
