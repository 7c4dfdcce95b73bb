use std::sync::atomic::{AtomicU64, Ordering};

/// An opaque key naming one subscription within one `Future`'s registry.
///
/// The id carries no semantics beyond uniqueness; it exists only so a specific
/// subscription can later be removed with `unsubscribe` before resolution.
/// Callers may mint process-unique ids with `fresh`, or bring their own via
/// `From<u64>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Mint a process-unique id.
    pub fn fresh() -> SubscriberId {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        SubscriberId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl From<u64> for SubscriberId {
    fn from(id: u64) -> SubscriberId {
        SubscriberId(id)
    }
}
