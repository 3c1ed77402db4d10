//! Activation signal: turns a container's shown/hidden callbacks into two
//! zero-replay streams a view model can gate its own subscriptions on.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::core::reactive::{Observable, Subject};

/// Something that tells observers when it becomes visible or hidden.
pub trait CanActivate {
    fn activated(&self) -> Observable<()>;

    fn deactivated(&self) -> Observable<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transition {
    Activated,
    Deactivated,
}

/// Emits once per notification, with no history for late subscribers.
///
/// Children registered with [`ActivationSignal::add_child`] are held weakly
/// and receive every notification after this signal's own observers.
#[derive(Default)]
pub struct ActivationSignal {
    activated: Subject<()>,
    deactivated: Subject<()>,
    children: RefCell<Vec<Weak<ActivationSignal>>>,
    notifying: Cell<bool>,
}

impl ActivationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call from the container's "became visible" hook.
    pub fn notify_activated(&self) {
        self.notify(Transition::Activated);
    }

    /// Call from the container's "became hidden" hook.
    pub fn notify_deactivated(&self) {
        self.notify(Transition::Deactivated);
    }

    pub fn add_child(&self, child: &Rc<ActivationSignal>) {
        self.children.borrow_mut().push(Rc::downgrade(child));
    }

    /// Live children; dead ones are pruned.
    pub fn child_count(&self) -> usize {
        self.live_children().len()
    }

    fn notify(&self, transition: Transition) {
        if self.notifying.replace(true) {
            tracing::warn!(?transition, "activation cycle detected, notification dropped");
            return;
        }

        match transition {
            Transition::Activated => self.activated.next(&()),
            Transition::Deactivated => self.deactivated.next(&()),
        }
        for child in self.live_children() {
            child.notify(transition);
        }

        self.notifying.set(false);
    }

    fn live_children(&self) -> Vec<Rc<ActivationSignal>> {
        let mut children = self.children.borrow_mut();
        children.retain(|child| child.strong_count() > 0);
        children.iter().filter_map(Weak::upgrade).collect()
    }
}

impl CanActivate for ActivationSignal {
    fn activated(&self) -> Observable<()> {
        self.activated.observable()
    }

    fn deactivated(&self) -> Observable<()> {
        self.deactivated.observable()
    }
}

impl fmt::Debug for ActivationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationSignal")
            .field("activated", &self.activated)
            .field("deactivated", &self.deactivated)
            .field("children", &self.children.borrow().len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/unit/activation.rs"]
mod tests;
