//! Hot, zero-replay event source.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use slotmap::{DefaultKey, SlotMap};

use super::observable::Observable;
use super::subscription::Subscription;

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Entry<T> {
    /// Registration order; slot keys are reused and cannot be sorted on.
    seq: u64,
    callback: Callback<T>,
}

struct SubjectInner<T> {
    observers: SlotMap<DefaultKey, Entry<T>>,
    next_seq: u64,
    emitting: bool,
    pending: VecDeque<T>,
}

/// Multicasts every value passed to [`Subject::next`] to the observers
/// subscribed at that moment, in registration order.
///
/// Nothing is buffered: an observer that subscribes late sees only values
/// emitted after it subscribed. A value emitted from inside an observer is
/// queued and delivered to everyone once the current value has been.
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectInner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Subject<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner {
                observers: SlotMap::new(),
                next_seq: 0,
                emitting: false,
                pending: VecDeque::new(),
            })),
        }
    }

    pub fn subscribe(&self, observer: impl FnMut(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(RefCell::new(observer));
        let key = {
            let mut inner = self.inner.borrow_mut();
            let seq = inner.next_seq;
            inner.next_seq += 1;
            inner.observers.insert(Entry { seq, callback })
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                let removed = inner.borrow_mut().observers.remove(key);
                drop(removed);
            }
        })
    }

    pub fn next(&self, value: &T)
    where
        T: Clone,
    {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.emitting {
                inner.pending.push_back(value.clone());
                return;
            }
            inner.emitting = true;
        }
        let _emitting = EmittingGuard(&self.inner);

        self.emit(value);
        loop {
            let queued = self.inner.borrow_mut().pending.pop_front();
            match queued {
                Some(queued) => self.emit(&queued),
                None => break,
            }
        }
    }

    fn emit(&self, value: &T) {
        let mut snapshot: Vec<(u64, DefaultKey, Callback<T>)> = self
            .inner
            .borrow()
            .observers
            .iter()
            .map(|(key, entry)| (entry.seq, key, Rc::clone(&entry.callback)))
            .collect();
        snapshot.sort_unstable_by_key(|(seq, _, _)| *seq);

        for (_, key, callback) in snapshot {
            // An earlier observer may have released this one mid-emission.
            if !self.inner.borrow().observers.contains_key(key) {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut observer) => (&mut *observer)(value),
                Err(_) => tracing::warn!(
                    value_type = std::any::type_name::<T>(),
                    "observer already running, value skipped"
                ),
            }
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    pub fn observable(&self) -> Observable<T> {
        let subject = self.clone();
        Observable::new(move |observer| subject.subscribe(observer))
    }
}

/// Clears the emitting flag even when an observer panics.
struct EmittingGuard<'a, T>(&'a RefCell<SubjectInner<T>>);

impl<T> Drop for EmittingGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.emitting = false;
            inner.pending.clear();
        }
    }
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("observers", &self.inner.borrow().observers.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/core/reactive/subject.rs"]
mod tests;
