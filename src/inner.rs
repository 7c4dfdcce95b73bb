use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;

use crate::outcome::{Handler, Outcome};
use crate::token::SubscriberId;

// Result cell and subscriber registry of one future instance. Both fields are
// only ever touched under the owning `Shared`'s mutex.
pub(crate) struct Inner<T, E> {
    // Single assignment: once `Some`, never changes and never reverts.
    result: Option<Arc<Outcome<T, E>>>,

    // Present while pending; taken exactly once at the pending->resolved
    // transition and `None` forever after (the tombstone).
    subscribers: Option<HashMap<SubscriberId, Handler<T, E>>>,
}

/// The mutex-guarded state shared by every handle to one future.
///
/// Each instance has its own lock; there is no global lock. Every method here
/// is a scoped acquisition, and the one thing that deliberately happens
/// *outside* the lock is invoking subscriber callbacks, so a callback may
/// re-enter `subscribe`/`complete`/`cancel` on this or a related future
/// without deadlocking.
pub(crate) struct Shared<T, E>(Mutex<Inner<T, E>>);

impl<T, E> Shared<T, E> {
    pub(crate) fn pending() -> Shared<T, E> {
        Shared(Mutex::new(Inner {
            result: None,
            subscribers: Some(HashMap::new()),
        }))
    }

    // A future born resolved never fans out, so the registry starts tombstoned.
    pub(crate) fn resolved(outcome: Outcome<T, E>) -> Shared<T, E> {
        Shared(Mutex::new(Inner {
            result: Some(Arc::new(outcome)),
            subscribers: None,
        }))
    }

    /// Commit `outcome` if the cell is still empty, then fan it out.
    ///
    /// First writer wins: a completion racing a cancellation is decided by
    /// whichever call takes the lock first while pending; the loser is a
    /// no-op. The subscriber map is snapshotted and cleared under the lock,
    /// and every captured handler runs after the lock is released, in
    /// unspecified order.
    pub(crate) fn complete(&self, outcome: Outcome<T, E>) {
        let (outcome, handlers) = {
            let mut lk = self.0.lock();
            if lk.result.is_some() {
                return;
            }
            let outcome = Arc::new(outcome);
            lk.result = Some(outcome.clone());
            (outcome, lk.subscribers.take())
        };

        if let Some(handlers) = handlers {
            trace!("future resolved, notifying {} subscriber(s)", handlers.len());
            for (_, handler) in handlers {
                handler(outcome.clone());
            }
        }
    }

    /// Register `handler` under `id`, or fire it synchronously if an outcome
    /// is already committed.
    ///
    /// Registration and the pending->resolved transition exclude each other
    /// under the lock, so a racing subscriber either sees the resolved cell
    /// here or is included in `complete`'s snapshot - never dropped.
    pub(crate) fn subscribe(&self, id: SubscriberId, handler: Handler<T, E>) {
        let fire = {
            let mut lk = self.0.lock();
            match lk.result.clone() {
                Some(outcome) => Some((handler, outcome)),
                None => {
                    lk.subscribers
                        .get_or_insert_with(HashMap::new)
                        .insert(id, handler);
                    None
                }
            }
        };

        if let Some((handler, outcome)) = fire {
            handler(outcome);
        }
    }

    /// Remove and return the handler registered under `id`, if the future is
    /// still pending and the id is present.
    pub(crate) fn unsubscribe(&self, id: SubscriberId) -> Option<Handler<T, E>> {
        let mut lk = self.0.lock();
        lk.subscribers.as_mut().and_then(|subs| subs.remove(&id))
    }

    /// Non-blocking snapshot of the committed outcome.
    pub(crate) fn result(&self) -> Option<Arc<Outcome<T, E>>> {
        self.0.lock().result.clone()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        matches!(
            self.0.lock().result.as_deref(),
            Some(Err(f)) if f.is_cancelled()
        )
    }
}

impl<T: Debug, E: Debug> Debug for Shared<T, E> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let lk = self.0.lock();
        match lk.result {
            Some(ref outcome) => write!(f, "Resolved({:?})", outcome),
            None => {
                let subs = lk.subscribers.as_ref().map_or(0, |s| s.len());
                write!(f, "Pending({} subscribers)", subs)
            }
        }
    }
}
