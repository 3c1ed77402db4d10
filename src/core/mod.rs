//! Core abstractions shared by binding and view resolution:
//! - reactive: subjects, properties, observables, subscriptions
//! - command: the command capability bound to UI triggers
//! - error / error_sink: error kinds and where pipeline errors go

pub mod command;
pub mod error;
pub mod error_sink;
pub mod reactive;

pub use command::{Command, DelegateCommand, Parameter};
pub use error::{BindingError, ConfigError, Result};
pub use error_sink::{ErrorSink, ObservableErrorSink, TracingErrorSink};
pub use reactive::{CompositeSubscription, Observable, Property, Subject, Subscription};
