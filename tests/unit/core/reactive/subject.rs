use super::*;
use std::cell::RefCell;
use std::rc::Rc;

fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |v: &T| sink.borrow_mut().push(v.clone()))
}

#[test]
fn test_late_subscriber_sees_no_history() {
    let subject = Subject::<i32>::new();
    subject.next(&1);
    subject.next(&2);

    let (seen, observer) = recorder::<i32>();
    let _sub = subject.subscribe(observer);
    assert!(seen.borrow().is_empty());

    subject.next(&3);
    assert_eq!(*seen.borrow(), vec![3]);
}

#[test]
fn test_registration_order() {
    let subject = Subject::<()>::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    let named = |name: &'static str| {
        let order = Rc::clone(&order);
        subject.subscribe(move |_| order.borrow_mut().push(name))
    };

    let a = named("a");
    let b = named("b");
    subject.next(&());
    assert_eq!(*order.borrow(), vec!["a", "b"]);

    // "c" lands in the slot "a" freed but still runs after "b".
    drop(a);
    let c = named("c");
    order.borrow_mut().clear();
    subject.next(&());
    assert_eq!(*order.borrow(), vec!["b", "c"]);
    drop((b, c));
}

#[test]
fn test_dispose_removes_observer() {
    let subject = Subject::<i32>::new();
    let (seen, observer) = recorder::<i32>();
    let mut sub = subject.subscribe(observer);
    assert_eq!(subject.observer_count(), 1);

    subject.next(&1);
    sub.dispose();
    assert_eq!(subject.observer_count(), 0);
    subject.next(&2);

    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn test_observer_released_mid_emission_is_skipped() {
    let subject = Subject::<i32>::new();
    let (seen, observer) = recorder::<i32>();
    let second: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let _first = {
        let second = Rc::clone(&second);
        subject.subscribe(move |_| {
            let taken = second.borrow_mut().take();
            drop(taken);
        })
    };
    *second.borrow_mut() = Some(subject.subscribe(observer));

    subject.next(&7);
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_reentrant_emission_is_queued() {
    let subject = Subject::<i32>::new();
    let calls = Rc::new(RefCell::new(Vec::new()));

    let _first = {
        let subject = subject.clone();
        let calls = Rc::clone(&calls);
        subject.clone().subscribe(move |v| {
            calls.borrow_mut().push(("first", *v));
            if *v == 1 {
                subject.next(&2);
            }
        })
    };
    let _second = {
        let calls = Rc::clone(&calls);
        subject.subscribe(move |v| calls.borrow_mut().push(("second", *v)))
    };

    subject.next(&1);
    assert_eq!(
        *calls.borrow(),
        vec![("first", 1), ("second", 1), ("first", 2), ("second", 2)]
    );
}

#[test]
fn test_observable_view() {
    let subject = Subject::<&'static str>::new();
    let (seen, observer) = recorder::<&'static str>();
    let _sub = subject.observable().subscribe(observer);

    subject.next(&"click");
    assert_eq!(*seen.borrow(), vec!["click"]);
}
