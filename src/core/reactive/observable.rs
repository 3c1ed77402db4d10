//! Type-erased, push-based value streams and their combinators.
//!
//! Delivery is synchronous: a source that emits drives every downstream
//! observer to completion before its emitting call returns.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use super::subscription::Subscription;

pub type Observer<T> = Box<dyn FnMut(&T)>;

type SubscribeFn<T> = dyn Fn(Observer<T>) -> Subscription;

pub struct Observable<T> {
    subscribe: Rc<SubscribeFn<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            subscribe: Rc::clone(&self.subscribe),
        }
    }
}

/// Identity: two handles are equal when they share the same source.
impl<T> PartialEq for Observable<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.subscribe, &other.subscribe)
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("item", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> Observable<T> {
    pub fn new(subscribe: impl Fn(Observer<T>) -> Subscription + 'static) -> Self {
        Self {
            subscribe: Rc::new(subscribe),
        }
    }

    pub fn subscribe(&self, observer: impl FnMut(&T) + 'static) -> Subscription {
        (self.subscribe)(Box::new(observer))
    }

    /// Never emits.
    pub fn never() -> Self {
        Self::new(|_| Subscription::empty())
    }

    /// Emits `value` once to each new subscriber, synchronously.
    pub fn just(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(move |mut observer| {
            observer(&value);
            Subscription::empty()
        })
    }

    pub fn map<U: 'static>(&self, f: impl Fn(&T) -> U + 'static) -> Observable<U> {
        let source = self.clone();
        let f = Rc::new(f);
        Observable::new(move |mut observer: Observer<U>| {
            let f = Rc::clone(&f);
            source.subscribe(move |value| observer(&(*f)(value)))
        })
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool + 'static) -> Observable<T> {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Observable::new(move |mut observer: Observer<T>| {
            let predicate = Rc::clone(&predicate);
            source.subscribe(move |value| {
                if (*predicate)(value) {
                    observer(value);
                }
            })
        })
    }

    /// Pairs the latest value of both streams, emitting whenever either side
    /// emits once both have produced at least one value.
    pub fn combine_latest<U>(&self, other: &Observable<U>) -> Observable<(T, U)>
    where
        T: Clone,
        U: Clone + 'static,
    {
        let left = self.clone();
        let right = other.clone();
        Observable::new(move |observer: Observer<(T, U)>| {
            let latest = Rc::new(RefCell::new(Latest::<T, U> {
                left: None,
                right: None,
            }));
            let observer = Rc::new(Serialized::new(observer));

            let left_sub = {
                let latest = Rc::clone(&latest);
                let observer = Rc::clone(&observer);
                left.subscribe(move |value| {
                    latest.borrow_mut().left = Some(value.clone());
                    emit_latest(&latest, &observer);
                })
            };
            let right_sub = {
                let latest = Rc::clone(&latest);
                let observer = Rc::clone(&observer);
                right.subscribe(move |value| {
                    latest.borrow_mut().right = Some(value.clone());
                    emit_latest(&latest, &observer);
                })
            };

            Subscription::composite([left_sub, right_sub])
        })
    }
}

impl<T: Clone + 'static> Observable<Observable<T>> {
    /// Follows the most recent inner stream, releasing the previous inner
    /// subscription before subscribing to the next one.
    pub fn switch_latest(&self) -> Observable<T> {
        let outer = self.clone();
        Observable::new(move |observer: Observer<T>| {
            let observer = Rc::new(Serialized::new(observer));
            let current: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

            let outer_sub = {
                let current = Rc::clone(&current);
                outer.subscribe(move |inner: &Observable<T>| {
                    let previous = current.borrow_mut().take();
                    drop(previous);

                    let observer = Rc::clone(&observer);
                    let next = inner.subscribe(move |value| observer.deliver(value));
                    *current.borrow_mut() = Some(next);
                })
            };
            let inner_release = Subscription::new(move || {
                let inner = current.borrow_mut().take();
                drop(inner);
            });

            Subscription::composite([outer_sub, inner_release])
        })
    }
}

struct Latest<T, U> {
    left: Option<T>,
    right: Option<U>,
}

fn emit_latest<T: Clone, U: Clone>(
    latest: &RefCell<Latest<T, U>>,
    observer: &Serialized<(T, U)>,
) {
    let pair = {
        let latest = latest.borrow();
        match (&latest.left, &latest.right) {
            (Some(left), Some(right)) => Some((left.clone(), right.clone())),
            _ => None,
        }
    };
    if let Some(pair) = pair {
        observer.deliver(&pair);
    }
}

/// An observer fed by several upstream callbacks.
///
/// A value that arrives while the observer is still running, for example
/// because the observer itself caused an upstream change, is queued and
/// delivered as soon as the running call returns.
struct Serialized<T> {
    observer: RefCell<Observer<T>>,
    pending: RefCell<VecDeque<T>>,
}

impl<T: Clone> Serialized<T> {
    fn new(observer: Observer<T>) -> Self {
        Self {
            observer: RefCell::new(observer),
            pending: RefCell::new(VecDeque::new()),
        }
    }

    fn deliver(&self, value: &T) {
        let Ok(mut observer) = self.observer.try_borrow_mut() else {
            self.pending.borrow_mut().push_back(value.clone());
            return;
        };
        (&mut **observer)(value);
        loop {
            let queued = self.pending.borrow_mut().pop_front();
            match queued {
                Some(queued) => (&mut **observer)(&queued),
                None => break,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/core/reactive/observable.rs"]
mod tests;
