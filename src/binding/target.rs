//! Static descriptions of bindable targets.
//!
//! Targets declare the trigger events they expose, with payload kinds, in a
//! `'static` table. Providers score a request from the descriptor alone and
//! only touch the instance when binding.

use std::any::{type_name, Any, TypeId};

use crate::core::reactive::{Observable, Subject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgsKind {
    Plain,
    Pointer,
    Tap,
}

/// Payload delivered when a trigger event fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerArgs {
    Plain,
    Pointer { x: f64, y: f64 },
    Tap { count: u32 },
}

impl TriggerArgs {
    pub fn kind(&self) -> ArgsKind {
        match self {
            TriggerArgs::Plain => ArgsKind::Plain,
            TriggerArgs::Pointer { .. } => ArgsKind::Pointer,
            TriggerArgs::Tap { .. } => ArgsKind::Tap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventDescriptor {
    pub name: &'static str,
    pub args: ArgsKind,
}

impl EventDescriptor {
    pub const fn new(name: &'static str, args: ArgsKind) -> Self {
        Self { name, args }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    events: &'static [EventDescriptor],
}

impl TypeDescriptor {
    pub fn of<T: Any>(events: &'static [EventDescriptor]) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            events,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn events(&self) -> &'static [EventDescriptor] {
        self.events
    }

    pub fn find_event(&self, name: &str) -> Option<&'static EventDescriptor> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Matches on both name and payload kind.
    pub fn exposes(&self, event: &EventDescriptor) -> bool {
        self.events.iter().any(|e| e == event)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeDescriptor {}

pub trait BindingTarget {
    fn descriptor(&self) -> TypeDescriptor;

    /// The live stream for a declared event, if the target has one.
    fn event(&self, name: &str) -> Option<Observable<TriggerArgs>>;
}

/// One transient binding attempt.
#[derive(Debug, Clone, Copy)]
pub struct BindingRequest {
    pub target: TypeDescriptor,
    pub has_explicit_target: bool,
}

impl BindingRequest {
    pub fn new(target: TypeDescriptor, has_explicit_target: bool) -> Self {
        Self {
            target,
            has_explicit_target,
        }
    }

    pub fn for_target(target: &dyn BindingTarget, event: Option<&str>) -> Self {
        Self::new(target.descriptor(), event.is_some())
    }
}

/// Event subjects for a target's declared events, for implementers of
/// [`BindingTarget`].
#[derive(Debug)]
pub struct TriggerEvents {
    events: Vec<(EventDescriptor, Subject<TriggerArgs>)>,
}

impl TriggerEvents {
    pub fn new(declared: &'static [EventDescriptor]) -> Self {
        Self {
            events: declared.iter().map(|e| (*e, Subject::new())).collect(),
        }
    }

    /// Returns `false` when no event with this name is declared.
    pub fn fire(&self, name: &str, args: TriggerArgs) -> bool {
        match self.events.iter().find(|(e, _)| e.name == name) {
            Some((_, subject)) => {
                subject.next(&args);
                true
            }
            None => false,
        }
    }

    pub fn stream(&self, name: &str) -> Option<Observable<TriggerArgs>> {
        self.events
            .iter()
            .find(|(e, _)| e.name == name)
            .map(|(_, subject)| subject.observable())
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.events
            .iter()
            .find(|(e, _)| e.name == name)
            .map_or(0, |(_, subject)| subject.observer_count())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/binding/target.rs"]
mod tests;
