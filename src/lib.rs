//! Futures, Promises and cancellation fan-out
//! ===========================================
//!
//! Quick example:
//!
//! ```
//! # use promise_fanout::{future_promise, SubscriberId};
//! # use std::sync::mpsc::channel;
//! # use std::thread;
//! let (fut, prom) = future_promise::<u32, String>();
//! let (tx, rx) = channel();
//!
//! // A time-consuming process on some other thread
//! thread::spawn(move || prom.success(123));
//!
//! // do something when the value is ready
//! fut.subscribe(SubscriberId::fresh(), move |outcome| { let _ = tx.send(outcome); });
//!
//! assert_eq!(*rx.recv().unwrap(), Ok(123));
//! ```
//!
//! This crate implements a pair of concepts: [`Future`]s - a subscription
//! handle on a value which may not yet be known - and [`Promise`]s - a
//! write-once container which sets the value. Producers and consumers may run
//! on arbitrary threads; every operation on a future is safe to call
//! concurrently, guarded by that instance's own lock.
//!
//! A `Future` is either pending or resolved. It resolves exactly once, with an
//! [`Outcome`]: a success value, a producer error, or the reserved
//! [`Failure::Cancelled`] tag. Whichever of the producer's completion call and
//! a consumer's [`cancel`](Cancel::cancel) acquires the lock first while
//! pending wins; every later completion attempt is a harmless no-op, so racing
//! finalizers need no error handling at all.
//!
//! Consumers register callbacks with [`Future::subscribe`] under an opaque
//! [`SubscriberId`]. A subscriber registered before resolution is fired
//! exactly once by the resolving call, after the lock is released; one
//! registered after resolution is fired synchronously. A subscription can be
//! withdrawn with [`Future::unsubscribe`] while the future is still pending.
//!
//! Cancellation travels the other way. Calling `cancel` resolves the future
//! with `Failure::Cancelled` through the ordinary completion path. For chains
//! of derived futures, the [`Cancel`] trait splits "cancel myself" from
//! "propagate to my source": [`Derived`] futures forward
//! [`cancel_upstream`](Cancel::cancel_upstream) to the future they were built
//! from, so cancelling the tail of a chain reaches the producer that can
//! actually stop the work, and the cancelled outcome then fans back out to
//! every other subscriber in the chain. [`Future::map`] is the reference
//! transform implementing that contract.
//!
//! Nothing here blocks a calling thread waiting for resolution; suspension is
//! the business of whatever scheduler is layered on top via `subscribe`.

mod cancel;
mod derived;
mod future;
mod inner;
mod outcome;
mod promise;
mod token;

#[cfg(test)]
mod test;

pub use cancel::Cancel;
pub use derived::Derived;
pub use future::{future_promise, Future};
pub use outcome::{is_cancelled, Failure, Handler, Outcome};
pub use promise::Promise;
pub use token::SubscriberId;
