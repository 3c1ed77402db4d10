//! Observable property: a current value plus change notification.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::observable::Observable;
use super::subject::Subject;

struct PropertyInner<T> {
    value: RefCell<T>,
    changed: Subject<T>,
}

/// A shared value cell that raises a change notification only when a new
/// value differs from the current one.
///
/// [`Property::observable`] emits the current value to each new subscriber
/// before any later change, so combining properties always starts from a
/// complete snapshot.
pub struct Property<T> {
    inner: Rc<PropertyInner<T>>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(PropertyInner {
                value: RefCell::new(value),
                changed: Subject::new(),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Returns `true` when the value changed and observers were notified.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value.clone();
        }
        self.inner.changed.next(&value);
        true
    }

    /// Changes only, without the current value.
    pub fn changed(&self) -> Observable<T> {
        self.inner.changed.observable()
    }

    /// The current value followed by every change.
    pub fn observable(&self) -> Observable<T> {
        let inner = Rc::clone(&self.inner);
        Observable::new(move |mut observer| {
            let current = inner.value.borrow().clone();
            observer(&current);
            inner.changed.subscribe(observer)
        })
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &*self.inner.value.borrow())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/core/reactive/property.rs"]
mod tests;
