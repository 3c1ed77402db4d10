//! Generic fallback provider that binds a command to a trigger event.
//!
//! Without an explicit event name the provider walks
//! [`DEFAULT_TRIGGER_EVENTS`] in priority order and takes the first event
//! the target declares with a matching payload kind.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::command::{Command, Parameter};
use crate::core::error::{BindingError, Result};
use crate::core::reactive::{Observable, Subscription};

use super::affinity::Affinity;
use super::registry::BindingProvider;
use super::target::{ArgsKind, BindingRequest, BindingTarget, EventDescriptor, TypeDescriptor};

/// Conventional trigger events, highest priority first.
pub const DEFAULT_TRIGGER_EVENTS: &[EventDescriptor] = &[
    EventDescriptor::new("Click", ArgsKind::Plain),
    EventDescriptor::new("TouchUpInside", ArgsKind::Plain),
    EventDescriptor::new("MouseUp", ArgsKind::Plain),
    EventDescriptor::new("PointerReleased", ArgsKind::Pointer),
    EventDescriptor::new("Tapped", ArgsKind::Tap),
];

#[derive(Debug, Clone, Copy)]
pub struct EventBindingProvider {
    events: &'static [EventDescriptor],
}

impl EventBindingProvider {
    pub fn new() -> Self {
        Self::with_events(DEFAULT_TRIGGER_EVENTS)
    }

    /// Uses a custom priority table instead of [`DEFAULT_TRIGGER_EVENTS`].
    pub fn with_events(events: &'static [EventDescriptor]) -> Self {
        Self { events }
    }

    pub fn default_event(&self, target: &TypeDescriptor) -> Option<&'static EventDescriptor> {
        self.events.iter().find(|candidate| target.exposes(candidate))
    }

    /// Binds to the named event, bypassing the priority table.
    pub fn bind_to_event(
        &self,
        command: Rc<dyn Command>,
        target: &dyn BindingTarget,
        parameter: &Observable<Parameter>,
        event: &str,
    ) -> Result<Subscription> {
        let descriptor = target.descriptor();
        let Some(trigger) = target.event(event) else {
            return Err(BindingError::NoBindableEventFound {
                target_type: descriptor.type_name(),
                event: Some(event.to_string()),
            });
        };

        // Parameters and trigger firings arrive independently; execution
        // always uses the latest parameter seen at fire time.
        let latest: Rc<RefCell<Option<Parameter>>> = Rc::new(RefCell::new(None));

        let parameter_sub = {
            let latest = Rc::clone(&latest);
            parameter.subscribe(move |value| {
                *latest.borrow_mut() = Some(Rc::clone(value));
            })
        };

        let trigger_sub = trigger.subscribe(move |_| {
            let parameter = latest.borrow().clone();
            if command.can_execute(parameter.as_ref()) {
                command.execute(parameter.as_ref());
            }
        });

        tracing::debug!(
            target_type = descriptor.type_name(),
            event,
            "command bound to event"
        );
        Ok(Subscription::composite([parameter_sub, trigger_sub]))
    }
}

impl Default for EventBindingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingProvider for EventBindingProvider {
    fn name(&self) -> &'static str {
        "EventBindingProvider"
    }

    fn affinity(&self, request: &BindingRequest) -> Affinity {
        if request.has_explicit_target {
            return Affinity::EXPLICIT_EVENT;
        }
        if self.default_event(&request.target).is_some() {
            Affinity::FALLBACK
        } else {
            Affinity::NONE
        }
    }

    fn bind(
        &self,
        command: Rc<dyn Command>,
        target: &dyn BindingTarget,
        parameter: &Observable<Parameter>,
        event: Option<&str>,
    ) -> Result<Subscription> {
        if let Some(event) = event {
            return self.bind_to_event(command, target, parameter, event);
        }

        let descriptor = target.descriptor();
        match self.default_event(&descriptor) {
            Some(default) => self.bind_to_event(command, target, parameter, default.name),
            None => Err(BindingError::NoBindableEventFound {
                target_type: descriptor.type_name(),
                event: None,
            }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/binding/event.rs"]
mod tests;
