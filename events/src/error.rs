//! Error types for the `events` crate.
//!
//! Follows the same pattern as `domain::error`: a root `Error` struct holding an
//! optional source and an error kind tree.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for event dispatch.
/// Handlers return this type from `handle`, and the dispatcher hands it back to
/// the caller of `notify` unchanged.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors that can surface from a dispatch.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Handler(HandlerErrorKind),
    Dispatch(DispatchErrorKind),
}

/// Errors raised by a handler while reacting to an event.
#[derive(Debug, PartialEq)]
pub enum HandlerErrorKind {
    /// A downstream system (CRM, mail provider, partner API) rejected or failed the call.
    External,
    /// The payload carried values the handler cannot act on.
    InvalidPayload,
    /// Any other failure, described by the handler for logs and callers.
    Other(String),
}

/// Errors produced by the dispatcher itself.
#[derive(Debug, PartialEq)]
pub enum DispatchErrorKind {
    /// A handler registered under the event's type expects a different payload type.
    PayloadMismatch {
        event_type: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl Error {
    /// Builds a handler error without an underlying cause.
    pub fn handler(kind: HandlerErrorKind) -> Self {
        Error {
            source: None,
            error_kind: ErrorKind::Handler(kind),
        }
    }

    /// Builds a handler error that wraps the cause reported by a downstream system.
    pub fn external<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Error {
            source: Some(err.into()),
            error_kind: ErrorKind::Handler(HandlerErrorKind::External),
        }
    }

    pub(crate) fn payload_mismatch(
        event_type: &str,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Error {
            source: None,
            error_kind: ErrorKind::Dispatch(DispatchErrorKind::PayloadMismatch {
                event_type: event_type.to_string(),
                expected,
                actual,
            }),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Handler(HandlerErrorKind::External) => match &self.source {
                Some(source) => write!(f, "Event handler external call failed: {source}"),
                None => write!(f, "Event handler external call failed"),
            },
            ErrorKind::Handler(HandlerErrorKind::InvalidPayload) => {
                write!(f, "Event handler rejected the event payload")
            }
            ErrorKind::Handler(HandlerErrorKind::Other(msg)) => {
                write!(f, "Event handler failed: {msg}")
            }
            ErrorKind::Dispatch(DispatchErrorKind::PayloadMismatch {
                event_type,
                expected,
                actual,
            }) => write!(
                f,
                "Handler registered for {event_type} expects payload {expected} but received {actual}"
            ),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}
