//! Disposal handles for reactive subscriptions.
//!
//! A [`Subscription`] releases whatever it guards exactly once, either on an
//! explicit [`Subscription::dispose`] call or when it is dropped.

use std::fmt;

pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A handle with nothing to release.
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Groups several subscriptions so they are released together.
    pub fn composite(subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
        let mut bag = CompositeSubscription::new();
        for subscription in subscriptions {
            bag.add(subscription);
        }
        Self::new(move || bag.dispose())
    }

    /// Idempotent.
    pub fn dispose(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.release.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// An owned set of subscriptions released together.
///
/// Subscriptions added after [`CompositeSubscription::dispose`] are released
/// immediately.
#[derive(Debug, Default)]
pub struct CompositeSubscription {
    items: Vec<Subscription>,
    disposed: bool,
}

impl CompositeSubscription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mut subscription: Subscription) {
        if self.disposed {
            subscription.dispose();
            return;
        }
        self.items.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        // Release in registration order.
        for mut item in self.items.drain(..) {
            item.dispose();
        }
    }
}

impl Extend<Subscription> for CompositeSubscription {
    fn extend<I: IntoIterator<Item = Subscription>>(&mut self, iter: I) {
        for subscription in iter {
            self.add(subscription);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/core/reactive/subscription.rs"]
mod tests;
