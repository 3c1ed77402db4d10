//! Command binding: picking the best provider for a target and wiring a
//! command's execution to one of the target's trigger events.

pub mod affinity;
pub mod event;
pub mod registry;
pub mod target;

pub use affinity::Affinity;
pub use event::{EventBindingProvider, DEFAULT_TRIGGER_EVENTS};
pub use registry::{BindingProvider, ProviderRegistry};
pub use target::{
    ArgsKind, BindingRequest, BindingTarget, EventDescriptor, TriggerArgs, TriggerEvents,
    TypeDescriptor,
};
