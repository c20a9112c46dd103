use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Count of in-flight calls; busy while any call holds a [BusyGuard].
#[derive(Debug, Default)]
pub(crate) struct BusyCounter(AtomicUsize);

impl BusyCounter {
    pub(crate) fn engage(&self) -> BusyGuard<'_> {
        self.0.fetch_add(1, Ordering::SeqCst);
        BusyGuard(&self.0)
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst) > 0
    }
}

/// Releases one in-flight call when dropped, whichever way the guarded
/// operation ends.
pub(crate) struct BusyGuard<'a>(&'a AtomicUsize);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
