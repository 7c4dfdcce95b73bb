use std::fmt::{self, Debug, Formatter};
use std::ops::Deref;
use std::sync::Arc;

use crate::cancel::Cancel;
use crate::future::{future_promise, Future};
use crate::token::SubscriberId;

/// A future derived from an upstream source, carrying the cancellation
/// forwarding contract.
///
/// A `Derived` bundles the transform's output future with a type-erased handle
/// on its source. Its [`Cancel`] implementation is the one every derived
/// future must provide: `cancel_upstream` forwards to the source instead of
/// touching the output, and `cancel` resolves the output *and* forwards, so a
/// consumer cancelling the last future of a chain stops the original producer
/// rather than just marking a downstream view as cancelled.
///
/// The wrapper derefs to its output [`Future`], so subscription and result
/// inspection work as on any other future.
pub struct Derived<T, E> {
    future: Future<T, E>,
    upstream: Arc<dyn Cancel + Send + Sync>,
}

impl<T, E> Derived<T, E> {
    /// Bundle a transform's output future with the source it derives from.
    ///
    /// Building blocks for operators not provided here: construct the output
    /// with [`future_promise()`](crate::future_promise), subscribe to the
    /// source, and wrap the pair.
    pub fn new(future: Future<T, E>, upstream: Arc<dyn Cancel + Send + Sync>) -> Derived<T, E> {
        Derived { future, upstream }
    }

    /// The transform's output future.
    pub fn future(&self) -> &Future<T, E> {
        &self.future
    }
}

impl<T, E> Clone for Derived<T, E> {
    fn clone(&self) -> Derived<T, E> {
        Derived {
            future: self.future.clone(),
            upstream: self.upstream.clone(),
        }
    }
}

impl<T, E> Cancel for Derived<T, E> {
    fn cancel(&self) {
        self.future.cancel();
        self.upstream.cancel_upstream();
    }

    fn is_cancelled(&self) -> bool {
        self.future.is_cancelled()
    }

    fn cancel_upstream(&self) {
        self.upstream.cancel_upstream();
    }
}

impl<T, E> Deref for Derived<T, E> {
    type Target = Future<T, E>;

    fn deref(&self) -> &Future<T, E> {
        &self.future
    }
}

impl<T: Debug, E: Debug> Debug for Derived<T, E> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Derived({:?})", self.future)
    }
}

impl<T, E> Future<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// The reference one-to-one transform.
    ///
    /// Apply `func` to the success value, producing a derived future of the
    /// mapped value; failures (including cancellation) pass through untouched.
    /// The function runs in whichever context resolves this future, so it
    /// should be quick.
    ///
    /// Cancelling the returned future forwards upstream to this one:
    ///
    /// ```
    /// # use promise_fanout::{future_promise, Cancel};
    /// let (fut, prom) = future_promise::<i32, String>();
    /// let mapped = fut.map(|v| v + 1);
    ///
    /// mapped.cancel();
    /// assert!(fut.is_cancelled());
    /// # drop(prom);
    /// ```
    pub fn map<U, F>(&self, func: F) -> Derived<U, E>
    where
        U: Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let (fut, prom) = future_promise();

        self.subscribe(SubscriberId::fresh(), move |outcome| match &*outcome {
            Ok(v) => prom.success(func(v.clone())),
            Err(f) => prom.complete(Err(f.clone())),
        });

        Derived::new(fut, Arc::new(self.clone()))
    }
}

impl<T, E> Derived<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// `map` for a derived future.
    ///
    /// The upstream handle of the result is this `Derived`, not its output
    /// future, so a cancellation requested further down the chain keeps
    /// forwarding hop by hop until it reaches the original source.
    pub fn map<U, F>(&self, func: F) -> Derived<U, E>
    where
        U: Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let out = self.future.map(func);

        Derived::new(out.future.clone(), Arc::new(self.clone()))
    }
}
