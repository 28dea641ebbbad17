//! Cancellation flag shared between signal handlers and the render loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Externally settable stop request, polled once per loop iteration.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}

/// Set up the Ctrl+C / SIGTERM handler to trip `flag`.
///
/// This should be called once at program startup. While the terminal is in
/// raw mode Ctrl+C arrives as a key press instead and is handled by the
/// surface.
pub fn install_ctrlc_handler(flag: &CancelFlag) -> Result<(), ctrlc::Error> {
    let flag = flag.clone();
    ctrlc::set_handler(move || {
        flag.cancel();
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_starts_clear() {
        assert!(!CancelFlag::new().is_cancelled());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        other.cancel();
        assert!(flag.is_cancelled());
        flag.cancel();
        assert!(other.is_cancelled());
    }
}
