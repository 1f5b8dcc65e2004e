//! How producers hand their events to a dispatcher.
//!
//! An `EventDispatcher` stops at the first failing handler. Wrapping it in
//! `Isolated` keeps invoking the remaining handlers and returns the first
//! failure once they have all run.
use events::{DispatchReport, DomainEvent, Error, EventData, EventDispatcher};
use log::*;

pub trait Notifier {
    fn raise<T: EventData>(&self, event: &DomainEvent<T>) -> Result<(), Error>;
}

impl Notifier for EventDispatcher {
    fn raise<T: EventData>(&self, event: &DomainEvent<T>) -> Result<(), Error> {
        self.notify(event)
    }
}

/// Dispatches through `EventDispatcher::notify_isolated` and logs every failure.
#[derive(Clone, Copy)]
pub struct Isolated<'a>(pub &'a EventDispatcher);

impl Notifier for Isolated<'_> {
    fn raise<T: EventData>(&self, event: &DomainEvent<T>) -> Result<(), Error> {
        let report = self.0.notify_isolated(event);
        log_report(&report);

        match report.failures.into_iter().next() {
            Some(failure) => Err(failure.error),
            None => Ok(()),
        }
    }
}

fn log_report(report: &DispatchReport) {
    info!(
        "{} reached {} handler(s), {} failed",
        report.event_type,
        report.invoked,
        report.failures.len()
    );
    for failure in &report.failures {
        warn!(
            "{} failed on {}: {}",
            failure.handler, report.event_type, failure.error
        );
    }
}
