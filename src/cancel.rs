/// The cancellation surface shared by futures, promises and derived futures.
///
/// `cancel` terminates *this* future by committing a `Failure::Cancelled`
/// outcome; because that routes through the single-assignment completion
/// operation it is always safe on an already-resolved future, and safe to call
/// from any thread, any number of times.
///
/// `cancel_upstream` is the propagation hook. For a plain source future the
/// default simply cancels `self`, but a derived future (one built from a
/// source via a transform) is expected to override it to forward the request
/// to its captured source, so that a cancellation requested on the last future
/// in a chain reaches the original producer - the only entity that can stop
/// real work. The cancelled outcome then fans out forward through the normal
/// completion path to every subscriber of every future in the chain.
///
/// Whether forwarding is appropriate is a per-operator policy: a one-to-one
/// transform such as [`map`](crate::Future::map) forwards, while a
/// broadcast-style future shared by independent consumers should override
/// `cancel_upstream` to a no-op so one consumer cannot cancel the others'
/// work.
pub trait Cancel {
    /// Resolve this future with `Failure::Cancelled`. No-op if already
    /// resolved.
    fn cancel(&self);

    /// Whether the committed outcome, if any, carries the cancellation tag.
    fn is_cancelled(&self) -> bool;

    /// Propagate a cancellation request towards the producer.
    fn cancel_upstream(&self) {
        self.cancel()
    }
}
