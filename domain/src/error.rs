//! Error types for the `domain` layer.
use events::error::{DispatchErrorKind, ErrorKind as EventErrorKindSource};
use events::Error as EventsError;
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums. The `source` field holds the original error that caused the domain
/// error, so failures raised by event handlers stay reachable through
/// `std::error::Error::source` after being translated into this layer.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Validation(ValidationErrorKind),
    Event(EventErrorKind),
}

/// Input rejected before any state change or event.
#[derive(Debug, PartialEq)]
pub enum ValidationErrorKind {
    MissingField(&'static str),
    InvalidPrice,
}

/// Failures that bubble up from dispatching a domain event.
#[derive(Debug, PartialEq)]
pub enum EventErrorKind {
    HandlerFailed,
    PayloadMismatch,
}

impl Error {
    pub(crate) fn missing_field(field: &'static str) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Validation(ValidationErrorKind::MissingField(field)),
        }
    }

    pub(crate) fn invalid_price() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Validation(ValidationErrorKind::InvalidPrice),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `events` layer to the `domain` layer.
impl From<EventsError> for Error {
    fn from(err: EventsError) -> Self {
        let event_error_kind = match &err.error_kind {
            EventErrorKindSource::Dispatch(DispatchErrorKind::PayloadMismatch { .. }) => {
                EventErrorKind::PayloadMismatch
            }
            EventErrorKindSource::Handler(_) => EventErrorKind::HandlerFailed,
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Event(event_error_kind),
        }
    }
}
