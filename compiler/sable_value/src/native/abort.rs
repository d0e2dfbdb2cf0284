//! Abort signalling for in-flight calls.
//!
//! The host owns an [`AbortController`] per top-level call (for example to
//! enforce a timeout) and threads its [`AbortSignal`] through every nested
//! [`NativeCall`](super::NativeCall). Bridges that never register a handler
//! are unaffected by abort.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Handle returned by registration, used to unregister.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AbortHandlerId(u64);

type AbortHandler = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct AbortState {
    aborted: bool,
    next_id: u64,
    handlers: Vec<(AbortHandlerId, AbortHandler)>,
}

/// Shared view of whether a call has been aborted.
#[derive(Clone, Default)]
pub struct AbortSignal(Arc<Mutex<AbortState>>);

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_aborted(&self) -> bool {
        self.0.lock().aborted
    }

    /// Number of handlers still waiting to fire.
    pub fn pending_handlers(&self) -> usize {
        self.0.lock().handlers.len()
    }

    pub(crate) fn register(&self, handler: impl FnOnce() + Send + 'static) -> AbortHandlerId {
        let mut state = self.0.lock();
        let id = AbortHandlerId(state.next_id);
        state.next_id = state.next_id.wrapping_add(1);

        if state.aborted {
            drop(state);
            tracing::trace!(?id, "abort handler registered after abort; running now");
            handler();
            return id;
        }

        state.handlers.push((id, Box::new(handler)));
        tracing::trace!(?id, "abort handler registered");
        id
    }

    pub(crate) fn unregister(&self, id: AbortHandlerId) -> bool {
        let mut state = self.0.lock();
        let Some(pos) = state.handlers.iter().position(|(h, _)| *h == id) else {
            return false;
        };
        // Released without running.
        drop(state.handlers.remove(pos));
        tracing::trace!(?id, "abort handler unregistered");
        true
    }

    fn trigger(&self) -> bool {
        let handlers = {
            let mut state = self.0.lock();
            if state.aborted {
                return false;
            }
            state.aborted = true;
            std::mem::take(&mut state.handlers)
        };

        tracing::debug!(handlers = handlers.len(), "abort signalled");
        // Handlers run unlocked so they may touch the signal themselves.
        for (_, handler) in handlers {
            handler();
        }
        true
    }
}

impl fmt::Debug for AbortSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.lock();
        f.debug_struct("AbortSignal")
            .field("aborted", &state.aborted)
            .field("pending_handlers", &state.handlers.len())
            .finish()
    }
}

/// Owner side of an [`AbortSignal`].
#[derive(Debug, Default)]
pub struct AbortController {
    signal: AbortSignal,
}

impl AbortController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal to hand to the call being controlled.
    pub fn signal(&self) -> AbortSignal {
        self.signal.clone()
    }

    /// Abort the call, running every registered handler exactly once.
    ///
    /// Returns `false` if the call was already aborted.
    pub fn abort(&self) -> bool {
        self.signal.trigger()
    }
}
