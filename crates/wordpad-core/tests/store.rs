use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wordpad_core::Store;

#[derive(Debug, Clone, Copy)]
enum Counter {
    Add(i64),
    Double,
    Reset,
}

fn reduce(state: &i64, action: Counter) -> i64 {
    match action {
        Counter::Add(n) => state + n,
        Counter::Double => state * 2,
        Counter::Reset => 0,
    }
}

fn counting(store: &Store<i64, Counter>) -> Rc<Cell<usize>> {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    store.subscribe(move || seen.set(seen.get() + 1));
    calls
}

#[test]
fn state_equals_replay_of_all_actions() {
    let actions = [
        Counter::Add(3),
        Counter::Double,
        Counter::Add(-1),
        Counter::Reset,
        Counter::Add(7),
        Counter::Double,
    ];
    let store = Store::new(1, reduce);

    let mut expected = 1;
    for action in actions {
        store.dispatch(action);
        expected = reduce(&expected, action);
        assert_eq!(*store.get_state(), expected);
    }
    assert_eq!(*store.get_state(), 14);
}

#[test]
fn state_is_replaced_not_mutated() {
    let store = Store::new(vec![1], |state: &Vec<i32>, n: i32| {
        let mut next = state.clone();
        next.push(n);
        next
    });
    let before = store.get_state();
    store.dispatch(2);
    assert_eq!(*before, vec![1]);
    assert_eq!(*store.get_state(), vec![1, 2]);
}

#[test]
fn every_listener_runs_once_per_dispatch() {
    for n in [0, 1, 5] {
        let store = Store::new(0, reduce);
        let counters: Vec<_> = (0..n).map(|_| counting(&store)).collect();
        store.dispatch(Counter::Add(1));
        assert!(counters.iter().all(|calls| calls.get() == 1));
        assert_eq!(store.listener_count(), n);
    }
}

#[test]
fn listeners_observe_the_new_state() {
    let store = Store::new(0, reduce);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let weak = store.downgrade();
    let log = Rc::clone(&seen);
    store.subscribe(move || {
        if let Some(store) = weak.upgrade() {
            log.borrow_mut().push(*store.get_state());
        }
    });

    store.dispatch(Counter::Add(2));
    store.dispatch(Counter::Double);
    assert_eq!(*seen.borrow(), vec![2, 4]);
}

#[test]
fn unsubscribed_listener_is_not_notified() {
    let store = Store::new(0, reduce);
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let subscription = store.subscribe(move || seen.set(seen.get() + 1));

    store.dispatch(Counter::Add(1));
    subscription.unsubscribe();
    store.dispatch(Counter::Add(1));

    assert_eq!(calls.get(), 1);
    assert!(!subscription.is_active());
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn unsubscribe_twice_is_a_no_op() {
    let store = Store::new(0, reduce);
    let first = store.subscribe(|| {});
    let second = store.subscribe(|| {});

    first.unsubscribe();
    first.unsubscribe();
    assert_eq!(store.listener_count(), 1);
    assert!(second.is_active());
}

#[test]
fn same_callback_registered_twice_counts_twice() {
    let store = Store::new(0, reduce);
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let listener = move || seen.set(seen.get() + 1);

    let first = store.subscribe(listener.clone());
    store.subscribe(listener);
    store.dispatch(Counter::Add(1));
    assert_eq!(calls.get(), 2);

    first.unsubscribe();
    store.dispatch(Counter::Add(1));
    assert_eq!(calls.get(), 3);
}

#[test]
fn dropping_the_handle_keeps_the_listener() {
    let store = Store::new(0, reduce);
    let calls = counting(&store);
    store.dispatch(Counter::Add(1));
    assert_eq!(calls.get(), 1);
    assert_eq!(store.listener_count(), 1);
}

#[test]
fn listener_removed_during_notification_never_runs_again() {
    let store = Store::new(0, reduce);
    let victim_calls = Rc::new(Cell::new(0));
    let handle: Rc<RefCell<Option<wordpad_core::Subscription>>> = Rc::new(RefCell::new(None));

    let target = Rc::clone(&handle);
    store.subscribe(move || {
        if let Some(subscription) = target.borrow().as_ref() {
            subscription.unsubscribe();
        }
    });
    let seen = Rc::clone(&victim_calls);
    *handle.borrow_mut() = Some(store.subscribe(move || seen.set(seen.get() + 1)));

    store.dispatch(Counter::Add(1));
    store.dispatch(Counter::Add(1));
    assert!(victim_calls.get() <= 1);
    assert_eq!(store.listener_count(), 1);

    let after = victim_calls.get();
    store.dispatch(Counter::Add(1));
    assert_eq!(victim_calls.get(), after);
}

#[test]
fn listener_added_during_notification_waits_for_next_dispatch() {
    let store = Store::new(0, reduce);
    let late_calls = Rc::new(Cell::new(0));
    let added = Rc::new(Cell::new(false));

    let weak = store.downgrade();
    let late = Rc::clone(&late_calls);
    let flag = Rc::clone(&added);
    store.subscribe(move || {
        if flag.replace(true) {
            return;
        }
        if let Some(store) = weak.upgrade() {
            let late = Rc::clone(&late);
            store.subscribe(move || late.set(late.get() + 1));
        }
    });

    store.dispatch(Counter::Add(1));
    assert_eq!(late_calls.get(), 0);
    store.dispatch(Counter::Add(1));
    assert_eq!(late_calls.get(), 1);
}

#[test]
fn reentrant_dispatch_runs_a_nested_pass() {
    let store = Store::new(0, reduce);
    let log = Rc::new(RefCell::new(Vec::new()));

    let weak = store.downgrade();
    let first = Rc::clone(&log);
    store.subscribe(move || {
        let Some(store) = weak.upgrade() else {
            return;
        };
        let state = *store.get_state();
        first.borrow_mut().push(format!("a{state}"));
        if state == 1 {
            store.dispatch(Counter::Add(10));
        }
    });

    let weak = store.downgrade();
    let second = Rc::clone(&log);
    store.subscribe(move || {
        if let Some(store) = weak.upgrade() {
            second.borrow_mut().push(format!("b{}", store.get_state()));
        }
    });

    store.dispatch(Counter::Add(1));
    assert_eq!(*log.borrow(), vec!["a1", "a11", "b11", "b11"]);
    assert_eq!(*store.get_state(), 11);
}

#[test]
fn clones_share_state_and_listeners() {
    let store = Store::new(0, reduce);
    let other = store.clone();
    let calls = counting(&other);

    store.dispatch(Counter::Add(5));
    assert_eq!(*other.get_state(), 5);
    assert_eq!(calls.get(), 1);
}

#[test]
fn weak_handle_does_not_keep_the_store_alive() {
    let store = Store::new(0, reduce);
    let weak = store.downgrade();
    assert!(weak.upgrade().is_some());
    drop(store);
    assert!(weak.upgrade().is_none());
}
