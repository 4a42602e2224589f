use std::sync::{atomic::{AtomicBool, Ordering}, Arc};

/// Cooperative cancellation, polled by [`crate::pipeline::run_pipeline`]
/// between chromosomes and between max-K intervals.
pub trait Cancel {
    fn is_cancelled(&self) -> bool;
}

/// An `AtomicBool`-backed [`Cancel`], cheaply cloneable and `Send + Sync`,
/// so a caller on another thread can request cancellation without the
/// engine itself spawning threads.
#[derive(Debug, Clone, Default)]
pub struct AtomicCancel(Arc<AtomicBool>);

impl AtomicCancel {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl Cancel for AtomicCancel {
    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A [`Cancel`] that never cancels, for callers with no need for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl Cancel for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_cancel_starts_uncancelled() {
        let c = AtomicCancel::new();
        assert!(!c.is_cancelled());
    }

    #[test]
    fn atomic_cancel_propagates_across_clones() {
        let c = AtomicCancel::new();
        let clone = c.clone();
        clone.cancel();
        assert!(c.is_cancelled());
    }

    #[test]
    fn never_cancel_is_always_false() {
        assert!(!NeverCancel.is_cancelled());
    }
}
