use super::*;

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;

#[test]
fn simple() {
    let (fut, prom) = future_promise::<i32, String>();
    let (tx, rx) = channel();

    fut.subscribe(SubscriberId::fresh(), move |outcome| tx.send(outcome).unwrap());
    prom.success(42);

    assert_eq!(*rx.recv().unwrap(), Ok(42));
    assert!(rx.try_recv().is_err()); // exactly once
    assert_eq!(fut.result().as_deref(), Some(&Ok(42)));
}

#[test]
fn subscribe_after_resolution_fires_synchronously() {
    let (fut, prom) = future_promise::<i32, String>();
    prom.success(7);

    let fired = Arc::new(AtomicBool::new(false));
    let f = fired.clone();
    fut.subscribe(SubscriberId::fresh(), move |outcome| {
        assert_eq!(*outcome, Ok(7));
        f.store(true, Ordering::SeqCst);
    });

    assert!(fired.load(Ordering::SeqCst));
}

#[test]
fn first_writer_wins() {
    let (fut, prom) = future_promise::<i32, String>();

    prom.success(1);
    fut.cancel();

    assert_eq!(fut.result().as_deref(), Some(&Ok(1)));
    assert!(!fut.is_cancelled());
}

#[test]
fn cancel_beats_late_completion() {
    let (fut, prom) = future_promise::<i32, String>();

    fut.cancel();
    prom.success(1);

    assert!(fut.is_cancelled());
    assert_eq!(fut.result().as_deref(), Some(&Err(Failure::Cancelled)));
}

#[test]
fn cancel_idempotent() {
    let (fut, prom) = future_promise::<i32, String>();

    let hits = Arc::new(AtomicUsize::new(0));
    let h = hits.clone();
    fut.subscribe(SubscriberId::fresh(), move |outcome| {
        assert!(is_cancelled(&outcome));
        h.fetch_add(1, Ordering::SeqCst);
    });

    fut.cancel();
    fut.cancel();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(fut.is_cancelled());
    mem::drop(prom); // also a no-op by now
}

#[test]
fn cancelled_then_subscribe() {
    let (fut, _prom) = future_promise::<i32, String>();
    fut.cancel();

    let fired = Arc::new(AtomicBool::new(false));
    let f = fired.clone();
    fut.subscribe(SubscriberId::fresh(), move |outcome| {
        assert!(is_cancelled(&outcome));
        f.store(true, Ordering::SeqCst);
    });

    assert!(fired.load(Ordering::SeqCst));
    assert!(fut.is_cancelled());
}

#[test]
fn unsubscribe_before_resolution() {
    let (fut, prom) = future_promise::<i32, String>();

    let fired = Arc::new(AtomicBool::new(false));
    let f = fired.clone();
    let id = SubscriberId::fresh();
    fut.subscribe(id, move |_| f.store(true, Ordering::SeqCst));

    assert!(fut.unsubscribe(id).is_some());
    prom.success(1);

    assert!(!fired.load(Ordering::SeqCst));
    assert!(fut.unsubscribe(id).is_none()); // registry is gone once resolved
}

#[test]
fn unsubscribe_unknown_id() {
    let (fut, _prom) = future_promise::<i32, String>();
    assert!(fut.unsubscribe(SubscriberId::from(999)).is_none());
}

#[test]
fn resubscribe_same_id_replaces() {
    let (fut, prom) = future_promise::<i32, String>();

    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let id = SubscriberId::from(7);

    let a = first.clone();
    fut.subscribe(id, move |_| { a.fetch_add(1, Ordering::SeqCst); });
    let b = second.clone();
    fut.subscribe(id, move |_| { b.fetch_add(1, Ordering::SeqCst); });

    prom.success(1);

    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn preset_futures() {
    let fut = Future::<i32, String>::with_value(123);
    assert_eq!(fut.result().as_deref(), Some(&Ok(123)));
    assert!(!fut.is_cancelled());

    let fut = Future::<i32, _>::with_error("boom".to_string());
    assert_eq!(fut.result().as_deref(), Some(&Err(Failure::Error("boom".to_string()))));
    assert!(!fut.is_cancelled());

    let fut = Future::from(Ok::<_, String>(5));
    assert_eq!(fut.result().as_deref(), Some(&Ok(5)));
}

#[test]
fn preset_future_fires_subscriber() {
    let fut = Future::<i32, String>::with_value(9);
    let (tx, rx) = channel();
    fut.subscribe(SubscriberId::fresh(), move |outcome| tx.send(outcome).unwrap());
    assert_eq!(*rx.recv().unwrap(), Ok(9));
}

#[test]
fn identity_equality() {
    let a = Future::<i32, String>::with_value(1);
    let b = Future::<i32, String>::with_value(1);

    // equal results, distinct instances
    assert_ne!(a, b);
    assert_eq!(a, a.clone());

    let hash = |fut: &Future<i32, String>| {
        let mut h = DefaultHasher::new();
        fut.hash(&mut h);
        h.finish()
    };
    assert_ne!(hash(&a), hash(&b));
    assert_eq!(hash(&a), hash(&a.clone()));

    let mut set = HashSet::new();
    set.insert(a.clone());
    assert!(set.contains(&a));
    assert!(!set.contains(&b));
}

#[test]
fn promise_mints_identical_handle() {
    let (fut, prom) = future_promise::<i32, String>();
    let other = prom.future();

    assert_eq!(fut, other); // same instance, same identity
    prom.success(3);
    assert_eq!(other.result().as_deref(), Some(&Ok(3)));
}

#[test]
fn dropped_promise_cancels() {
    let (fut, prom) = future_promise::<i32, String>();

    mem::drop(prom);

    assert!(fut.is_cancelled());
    assert_eq!(fut.result().as_deref(), Some(&Err(Failure::Cancelled)));
}

#[test]
fn producer_observes_cancellation() {
    let (fut, prom) = future_promise::<i32, String>();
    assert!(!prom.is_cancelled());

    fut.cancel();
    assert!(prom.is_cancelled());
}

#[test]
fn reentrant_subscribe_from_handler() {
    let (fut, prom) = future_promise::<i32, String>();
    let (tx, rx) = channel();

    // the handler runs after the lock is released, so re-entering the same
    // future must not deadlock
    let inner = fut.clone();
    fut.subscribe(SubscriberId::fresh(), move |_| {
        inner.subscribe(SubscriberId::fresh(), move |outcome| tx.send(outcome).unwrap());
    });

    prom.success(9);
    assert_eq!(*rx.recv().unwrap(), Ok(9));
}

#[test]
fn reentrant_cancel_from_handler() {
    let (fut, prom) = future_promise::<i32, String>();

    let inner = fut.clone();
    fut.subscribe(SubscriberId::fresh(), move |_| inner.cancel());

    prom.success(2);

    // the re-entrant cancel lost the race and must be a no-op
    assert_eq!(fut.result().as_deref(), Some(&Ok(2)));
}

#[test]
fn map_applies_to_success() {
    let (fut, prom) = future_promise::<i32, String>();
    let mapped = fut.map(|v| v * 2);

    prom.success(21);

    assert_eq!(mapped.result().as_deref(), Some(&Ok(42)));
}

#[test]
fn map_passes_failure_through() {
    let (fut, prom) = future_promise::<i32, String>();
    let mapped = fut.map(|v| v * 2);

    prom.fail("boom".to_string());

    assert_eq!(
        mapped.result().as_deref(),
        Some(&Err(Failure::Error("boom".to_string())))
    );
    assert!(!mapped.is_cancelled());
}

#[test]
fn map_chains() {
    let (fut, prom) = future_promise::<i32, String>();
    let tail = fut.map(|v| v + 1).map(|v| v + 2).map(|v| v + 3);

    prom.success(1);

    assert_eq!(tail.result().as_deref(), Some(&Ok(7)));
}

#[test]
fn cancel_propagates_to_source() {
    let (fut, prom) = future_promise::<i32, String>();

    // an independent subscriber of the source
    let (tx, rx) = channel();
    fut.subscribe(SubscriberId::fresh(), move |outcome| tx.send(outcome).unwrap());

    let a = fut.map(|v| v + 1);
    let b = a.map(|v| v * 2);

    b.cancel();

    assert!(fut.is_cancelled());
    assert!(a.is_cancelled());
    assert!(b.is_cancelled());
    assert!(is_cancelled(&rx.recv().unwrap()));
    mem::drop(prom);
}

#[test]
fn cancel_upstream_walks_the_chain() {
    let (fut, _prom) = future_promise::<i32, String>();
    let tail = fut.map(|v| v + 1).map(|v| v + 1);

    tail.cancel_upstream();

    assert!(fut.is_cancelled());
    // the cancelled outcome fans back down through the subscriptions
    assert!(tail.is_cancelled());
}

#[test]
fn plain_future_cancel_upstream_is_cancel() {
    let (fut, _prom) = future_promise::<i32, String>();

    fut.cancel_upstream();

    assert!(fut.is_cancelled());
}

#[test]
fn failure_display() {
    let cancelled: Failure<String> = Failure::Cancelled;
    assert_eq!(cancelled.to_string(), "future was cancelled");
    assert!(cancelled.is_cancelled());

    let failed: Failure<String> = Failure::Error("boom".to_string());
    assert_eq!(failed.to_string(), "boom");
    assert!(!failed.is_cancelled());
}
