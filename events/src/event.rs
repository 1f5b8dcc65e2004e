use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// A type alias for the identifier assigned to every event occurrence.
pub type Id = Uuid;

/// Payload carried by a [`DomainEvent`].
///
/// Each kind of domain occurrence gets its own payload type, and the payload type
/// decides the event-type identifier handlers are registered under.
pub trait EventData: fmt::Debug + Send + Sync + 'static {
    /// Stable identifier for this kind of event (e.g. `"ProductCreatedEvent"`).
    const EVENT_TYPE: &'static str;
}

/// Immutable record of something that happened in the domain.
///
/// Fields are only reachable through accessors, so an event never changes after
/// construction. The same reference is handed to every handler during dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct DomainEvent<T: EventData> {
    id: Id,
    event_type: &'static str,
    occurred_at: DateTime<Utc>,
    data: T,
}

impl<T: EventData> DomainEvent<T> {
    pub fn new(data: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: T::EVENT_TYPE,
            occurred_at: Utc::now(),
            data,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn event_type(&self) -> &'static str {
        self.event_type
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}
