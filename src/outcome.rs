use std::sync::Arc;

use thiserror::Error;

/// The terminal value of a `Future`: a success payload or a `Failure`.
///
/// An `Outcome` is committed at most once per future and never changes
/// afterwards. Subscribers receive it behind an `Arc` so that one committed
/// outcome can fan out to any number of callbacks without cloning the payload.
pub type Outcome<T, E> = Result<T, Failure<E>>;

/// Why a `Future` resolved without a value.
///
/// Exactly one failure kind is defined at this layer: `Cancelled`, produced by
/// the cancellation path. Everything else is an opaque producer-supplied error
/// carried through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure<E> {
    /// The future was terminated by explicit request, not by producer failure.
    #[error("future was cancelled")]
    Cancelled,

    /// A producer-side error.
    #[error("{0}")]
    Error(E),
}

impl<E> Failure<E> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Failure::Cancelled)
    }
}

/// A completion callback, invoked exactly once with the committed outcome.
pub type Handler<T, E> = Box<dyn FnOnce(Arc<Outcome<T, E>>) + Send>;

/// True if `outcome` carries the cancellation tag.
pub fn is_cancelled<T, E>(outcome: &Outcome<T, E>) -> bool {
    matches!(outcome, Err(f) if f.is_cancelled())
}
