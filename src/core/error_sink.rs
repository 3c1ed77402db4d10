//! Where pipeline errors go when no caller is on the stack to receive them.
//!
//! Errors raised inside a subscription (for example a view that cannot be
//! resolved) are routed to an [`ErrorSink`] instead of tearing down the
//! pipeline. Hosts take an explicit sink and fall back to the process-scoped
//! default only when none was supplied.

use std::cell::RefCell;
use std::rc::Rc;

use super::error::BindingError;
use super::reactive::{Observable, Subject};

pub trait ErrorSink {
    fn handle(&self, error: &BindingError);
}

/// Logs every error at `error` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn handle(&self, error: &BindingError) {
        tracing::error!(error = %error, "unhandled binding error");
    }
}

/// Logs and republishes every error so callers can observe failures.
#[derive(Debug, Default, Clone)]
pub struct ObservableErrorSink {
    thrown: Subject<BindingError>,
}

impl ObservableErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thrown_errors(&self) -> Observable<BindingError> {
        self.thrown.observable()
    }
}

impl ErrorSink for ObservableErrorSink {
    fn handle(&self, error: &BindingError) {
        TracingErrorSink.handle(error);
        self.thrown.next(error);
    }
}

thread_local! {
    static DEFAULT_SINK: RefCell<Rc<dyn ErrorSink>> = RefCell::new(Rc::new(TracingErrorSink));
}

pub fn default_sink() -> Rc<dyn ErrorSink> {
    DEFAULT_SINK.with(|sink| Rc::clone(&sink.borrow()))
}

/// Replaces the process default, returning the previous one.
pub fn set_default_sink(sink: Rc<dyn ErrorSink>) -> Rc<dyn ErrorSink> {
    DEFAULT_SINK.with(|current| current.replace(sink))
}

#[cfg(test)]
#[path = "../../tests/unit/core/error_sink.rs"]
mod tests;
