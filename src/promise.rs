use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::cancel::Cancel;
use crate::future::Future;
use crate::inner::Shared;
use crate::outcome::{Failure, Outcome};

/// The producer's handle: the completion entry point of one future.
///
/// A `Promise` is the same underlying entity as its [`Future`], exposed in the
/// producer role. It is completed at most once, by [`success`](Promise::success),
/// [`fail`](Promise::fail) or [`complete`](Promise::complete) - all of which
/// consume it - or by being dropped, which cancels the future so that
/// subscribers are not left waiting on an abandoned producer.
///
/// Completion races (including against consumer-side cancellation) need no
/// error handling: first writer wins and every later attempt is a no-op.
///
/// It may only be created in a pair with a `Future` using
/// [`future_promise()`](crate::future_promise).
pub struct Promise<T, E>(Arc<Shared<T, E>>);

impl<T, E> Promise<T, E> {
    pub(crate) fn new(shared: Arc<Shared<T, E>>) -> Promise<T, E> {
        Promise(shared)
    }

    /// Fulfill the promise with a success value.
    pub fn success(self, v: T) {
        self.0.complete(Ok(v));
    }

    /// Fail the promise with a producer error.
    pub fn fail(self, e: E) {
        self.0.complete(Err(Failure::Error(e)));
    }

    /// Commit an arbitrary outcome.
    pub fn complete(self, outcome: Outcome<T, E>) {
        self.0.complete(outcome);
    }

    /// Mint another consumer handle onto the same future.
    pub fn future(&self) -> Future<T, E> {
        Future::new(self.0.clone())
    }
}

impl<T, E> Cancel for Promise<T, E> {
    fn cancel(&self) {
        self.0.complete(Err(Failure::Cancelled));
    }

    /// Lets a long-running producer notice a consumer's cancellation and stop
    /// early.
    ///
    /// ```
    /// # use promise_fanout::{future_promise, Cancel};
    /// # use std::thread;
    /// # struct State; impl State { fn new() -> State { State } fn step(&mut self) -> Option<u32> { Some(1) } }
    /// let (fut, prom) = future_promise::<u32, String>();
    ///
    /// thread::spawn(move || {
    ///     let mut s = State::new();
    ///     while !prom.is_cancelled() {
    ///         match s.step() {
    ///             None => (),
    ///             Some(res) => { prom.success(res); break },
    ///         }
    ///     }
    /// });
    /// // ...
    /// # let _ = fut;
    /// ```
    fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}

// A promise dropped without completing cancels its future.
impl<T, E> Drop for Promise<T, E> {
    fn drop(&mut self) {
        self.0.complete(Err(Failure::Cancelled));
    }
}

impl<T: Debug, E: Debug> Debug for Promise<T, E> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Promise({:?})", self.0)
    }
}
