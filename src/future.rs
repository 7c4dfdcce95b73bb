use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::debug;

use crate::cancel::Cancel;
use crate::inner::Shared;
use crate::outcome::{Failure, Handler, Outcome};
use crate::promise::Promise;
use crate::token::SubscriberId;

/// The consumer's handle to an eventual single outcome.
///
/// A `Future` is created pending, typically in a pair with a [`Promise`] using
/// [`future_promise()`], and resolves at most once - by the promise committing
/// an outcome, or by [`cancel`](Cancel::cancel), whichever wins. Any number of
/// handles (clones) may subscribe, poll [`result`](Future::result) or cancel
/// from any thread.
///
/// Two futures are equal only if they are the same instance; equality and
/// hashing go by identity, never by value, so futures can key maps and sets
/// (e.g. a scheduler's in-flight table) without colliding on coincidentally
/// equal results.
pub struct Future<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> Future<T, E> {
    pub(crate) fn new(shared: Arc<Shared<T, E>>) -> Future<T, E> {
        Future { shared }
    }

    /// Construct an already successful `Future`. Useful for lifting constants
    /// into a pipeline; no fan-out is ever triggered.
    ///
    /// ```
    /// # use promise_fanout::Future;
    /// let fut = Future::<_, String>::with_value(123);
    /// assert_eq!(fut.result().as_deref(), Some(&Ok(123)));
    /// ```
    pub fn with_value(v: T) -> Future<T, E> {
        Future::with_outcome(Ok(v))
    }

    /// Construct an already failed `Future`.
    pub fn with_error(e: E) -> Future<T, E> {
        Future::with_outcome(Err(Failure::Error(e)))
    }

    /// Construct a `Future` resolved with an arbitrary outcome.
    pub fn with_outcome(outcome: Outcome<T, E>) -> Future<T, E> {
        Future::new(Arc::new(Shared::resolved(outcome)))
    }

    /// Register `handler` to receive the outcome.
    ///
    /// If an outcome is already committed the handler is invoked synchronously
    /// on the calling thread; otherwise it is registered under `id` and fired
    /// exactly once, later, by whichever completion call resolves the future.
    /// A second `subscribe` with the same `id` replaces the earlier handler.
    ///
    /// Every subscription sees exactly one invocation with the terminal
    /// outcome - provided the future eventually resolves. A future that stays
    /// pending forever never fires its subscribers.
    ///
    /// ```
    /// # use promise_fanout::{future_promise, SubscriberId};
    /// # use std::sync::mpsc::channel;
    /// let (fut, prom) = future_promise::<i32, String>();
    /// let (tx, rx) = channel();
    ///
    /// fut.subscribe(SubscriberId::fresh(), move |outcome| { let _ = tx.send(outcome); });
    /// prom.success(123);
    ///
    /// assert_eq!(*rx.recv().unwrap(), Ok(123));
    /// ```
    pub fn subscribe<F>(&self, id: SubscriberId, handler: F)
    where
        F: FnOnce(Arc<Outcome<T, E>>) + Send + 'static,
    {
        self.shared.subscribe(id, Box::new(handler))
    }

    /// Remove the subscription registered under `id`, returning its handler.
    ///
    /// Returns `None` if the future already resolved (the registry is gone) or
    /// no such id was registered. A removed handler will never be fired by the
    /// fan-out.
    pub fn unsubscribe(&self, id: SubscriberId) -> Option<Handler<T, E>> {
        self.shared.unsubscribe(id)
    }

    /// Snapshot of the committed outcome, or `None` while pending. Never
    /// blocks.
    pub fn result(&self) -> Option<Arc<Outcome<T, E>>> {
        self.shared.result()
    }
}

impl<T, E> Clone for Future<T, E> {
    fn clone(&self) -> Future<T, E> {
        Future { shared: self.shared.clone() }
    }
}

impl<T, E> Cancel for Future<T, E> {
    /// Resolve with `Failure::Cancelled`.
    ///
    /// Cancellation is just a terminal failure outcome: it obeys first writer
    /// wins (cancelling a resolved future is a no-op) and is delivered to all
    /// current and later subscribers through the same fan-out path as any
    /// other completion.
    fn cancel(&self) {
        debug!("cancellation requested");
        self.shared.complete(Err(Failure::Cancelled));
    }

    fn is_cancelled(&self) -> bool {
        self.shared.is_cancelled()
    }
}

impl<T, E> PartialEq for Future<T, E> {
    fn eq(&self, other: &Future<T, E>) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T, E> Eq for Future<T, E> {}

impl<T, E> Hash for Future<T, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.shared) as usize).hash(state)
    }
}

impl<T: Debug, E: Debug> Debug for Future<T, E> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Future({:?})", self.shared)
    }
}

impl<T, E> From<Result<T, E>> for Future<T, E> {
    fn from(res: Result<T, E>) -> Future<T, E> {
        Future::with_outcome(res.map_err(Failure::Error))
    }
}

/// Construct a bound `Future`/`Promise` pair.
///
/// The [`Future`] is the consumer surface (subscribe, result, cancel); the
/// [`Promise`] is the producer surface holding the completion entry point. If
/// the promise is dropped without completing, the future resolves with
/// `Failure::Cancelled` so subscribers are not left pending forever.
///
/// ```
/// # use promise_fanout::future_promise;
/// let (fut, prom) = future_promise::<i32, String>();
/// # let _ = (fut, prom);
/// ```
pub fn future_promise<T, E>() -> (Future<T, E>, Promise<T, E>) {
    let shared = Arc::new(Shared::pending());
    let f = Future::new(shared.clone());
    let p = Promise::new(shared);

    (f, p)
}
