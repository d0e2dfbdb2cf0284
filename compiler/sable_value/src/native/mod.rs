//! Native-bridge calling convention.
//!
//! A native bridge receives, along with its arguments, a [`NativeCall`]:
//! the operations bundle of the in-flight call. Through it the bridge can
//! call back into any callable value asynchronously and register cleanup
//! that runs if the call is aborted.
//!
//! The value layer never awaits anything itself. [`NativeHost`] is the seam
//! where the embedding evaluator plugs in its own invocation machinery.

mod abort;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::NativeResult;
use crate::value::{FunctionValue, Value};

pub use abort::{AbortController, AbortHandlerId, AbortSignal};

/// Boxed future produced by asynchronous calls.
pub type NativeFuture = Pin<Box<dyn Future<Output = NativeResult> + Send + 'static>>;

/// Invocation machinery provided by the embedding evaluator.
pub trait NativeHost: Send + Sync {
    /// Invoke `func` on behalf of `caller`.
    ///
    /// Implementations run the callee in `caller.enter()` so that nesting
    /// depth and the abort signal carry over.
    fn invoke(self: Arc<Self>, func: FunctionValue, args: Vec<Value>, caller: &NativeCall)
        -> NativeFuture;
}

/// Operations bundle handed to a native bridge for one invocation.
#[derive(Clone)]
pub struct NativeCall {
    host: Arc<dyn NativeHost>,
    signal: AbortSignal,
    depth: usize,
}

impl NativeCall {
    /// Root frame for a top-level call.
    pub fn new(host: Arc<dyn NativeHost>, signal: AbortSignal) -> Self {
        NativeCall {
            host,
            signal,
            depth: 0,
        }
    }

    /// Call another callable value through the host.
    pub fn call(&self, func: &FunctionValue, args: Vec<Value>) -> NativeFuture {
        Arc::clone(&self.host).invoke(func.clone(), args, self)
    }

    /// Run `handler` once if this call is aborted.
    ///
    /// If the call was already aborted the handler runs immediately.
    pub fn register_abort_handler(
        &self,
        handler: impl FnOnce() + Send + 'static,
    ) -> AbortHandlerId {
        self.signal.register(handler)
    }

    /// Remove a handler before it fires.
    ///
    /// Returns `true` only for the first removal of a handler that has not
    /// fired yet.
    pub fn unregister_abort_handler(&self, id: AbortHandlerId) -> bool {
        self.signal.unregister(id)
    }

    pub fn is_aborted(&self) -> bool {
        self.signal.is_aborted()
    }

    pub fn signal(&self) -> &AbortSignal {
        &self.signal
    }

    /// Number of enclosing host calls.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Frame for a callee: same host and signal, one level deeper.
    #[must_use]
    pub fn enter(&self) -> NativeCall {
        NativeCall {
            host: Arc::clone(&self.host),
            signal: self.signal.clone(),
            depth: self.depth.saturating_add(1),
        }
    }
}

impl fmt::Debug for NativeCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeCall")
            .field("depth", &self.depth)
            .field("aborted", &self.signal.is_aborted())
            .finish_non_exhaustive()
    }
}
