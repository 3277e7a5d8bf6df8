use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Once;

use crate::traits::AbortSignal;

static HANDLER: Once = Once::new();
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

fn install_interrupt_handler() {
    HANDLER.call_once(|| {
        let installed = ctrlc::set_handler(|| {
            tracing::warn!("interrupt received, the swarm stops before its next iteration");
            INTERRUPTED.store(true, Ordering::SeqCst);
        });
        if let Err(err) = installed {
            tracing::warn!(%err, "Ctrl-C handler not installed, runs can only stop on their own");
        }
    });
}

/// Stops a swarm run when the process receives `Ctrl-C`.
///
/// The handler is installed once per process, the first time one of these is created, and all
/// instances share one flag. The iteration in progress is finished and the best point found so
/// far is still summarized.
/// <div class="warning">Installing the handler replaces any `Ctrl-C` handling done elsewhere in
/// the process.</div>
pub struct CtrlCAbortSignal {
    interrupted: &'static AtomicBool,
}

impl CtrlCAbortSignal {
    /// Install the process-wide handler (if needed) and return a signal watching it.
    pub fn new() -> Self {
        install_interrupt_handler();
        Self {
            interrupted: &INTERRUPTED,
        }
    }
}

impl Default for CtrlCAbortSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl AbortSignal for CtrlCAbortSignal {
    fn is_aborted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    fn abort(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    fn reset(&self) {
        self.interrupted.store(false, Ordering::SeqCst);
    }
}

/// A flag which any thread can raise to stop a swarm run; share it through an `Arc`.
#[derive(Default)]
pub struct AtomicAbortSignal {
    raised: AtomicBool,
}

impl AtomicAbortSignal {
    /// A lowered flag.
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }
}

impl AbortSignal for AtomicAbortSignal {
    fn is_aborted(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    fn abort(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    fn reset(&self) {
        self.raised.store(false, Ordering::SeqCst);
    }
}

impl<T: AbortSignal + ?Sized> AbortSignal for std::sync::Arc<T> {
    fn is_aborted(&self) -> bool {
        (**self).is_aborted()
    }

    fn abort(&self) {
        (**self).abort()
    }

    fn reset(&self) {
        (**self).reset()
    }
}

/// Never stops a run. Used when no other signal is configured.
#[derive(Default)]
pub struct NopAbortSignal;

impl NopAbortSignal {
    /// A signal that is never raised.
    pub const fn new() -> Self {
        Self {}
    }
}

impl AbortSignal for NopAbortSignal {
    fn is_aborted(&self) -> bool {
        false
    }

    fn abort(&self) {}

    fn reset(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_atomic_abort_signal() {
        let signal = AtomicAbortSignal::new();
        assert!(!signal.is_aborted());
        signal.abort();
        assert!(signal.is_aborted());
        signal.reset();
        assert!(!signal.is_aborted());
    }

    #[test]
    fn test_shared_abort_signal() {
        let signal = Arc::new(AtomicAbortSignal::new());
        let handle = signal.clone();
        std::thread::spawn(move || handle.abort())
            .join()
            .unwrap();
        assert!(signal.is_aborted());
    }

    #[test]
    fn test_ctrl_c_signals_share_one_flag() {
        let first = CtrlCAbortSignal::new();
        let second = CtrlCAbortSignal::default();
        first.reset();
        assert!(!second.is_aborted());
        first.abort();
        assert!(second.is_aborted());
        second.reset();
        assert!(!first.is_aborted());
    }

    #[test]
    fn test_nop_abort_signal() {
        let signal = NopAbortSignal::new();
        signal.abort();
        assert!(!signal.is_aborted());
    }
}
