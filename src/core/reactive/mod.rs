//! Single-threaded, push-based reactive primitives.
//!
//! - [`Subject`]: hot event source with no replay.
//! - [`Property`]: current value plus change notification.
//! - [`Observable`]: type-erased stream handle with `map`, `filter`,
//!   `combine_latest` and `switch_latest`.
//! - [`Subscription`] / [`CompositeSubscription`]: release on dispose or drop.
//!
//! Shared state lives in `Rc<RefCell<..>>`; observers are kept in a slot map
//! and notified in registration order. An observer released during an
//! emission is not called for the remainder of it.

pub mod observable;
pub mod property;
pub mod subject;
pub mod subscription;

pub use observable::{Observable, Observer};
pub use property::Property;
pub use subject::Subject;
pub use subscription::{CompositeSubscription, Subscription};
