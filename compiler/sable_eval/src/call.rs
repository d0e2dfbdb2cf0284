//! Function invocation.
//!
//! [`CallHost`] is the `NativeHost` behind every `NativeCall`. It binds
//! arguments for user closures and runs native bridges, and it owns the
//! abort and recursion checks. Statement execution stays with the
//! evaluator, reached through [`StmtExecutor`].

use std::fmt;
use std::sync::Arc;

use sable_ir::StmtRange;
use sable_value::{
    unwrap_return, unwrap_value, AbortSignal, EnvRef, FunctionValue, NativeCall, NativeError,
    NativeFuture, NativeHost, NormalValue, UserFunction, Value, ValueKind, Variable,
};

use crate::config::HostConfig;

/// Runs the body of a user closure.
///
/// The returned future resolves to the body's completion value, which may
/// still be a `return` signal; the host unwraps it.
pub trait StmtExecutor: Send + Sync {
    fn exec_block(&self, body: StmtRange, env: EnvRef, frame: NativeCall) -> NativeFuture;
}

/// Invocation machinery shared by every frame of one evaluator.
pub struct CallHost<E> {
    executor: E,
    config: HostConfig,
}

impl<E: StmtExecutor + 'static> CallHost<E> {
    pub fn new(executor: E) -> Arc<Self> {
        Self::with_config(executor, HostConfig::default())
    }

    pub fn with_config(executor: E, config: HostConfig) -> Arc<Self> {
        Arc::new(CallHost { executor, config })
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Root frame for a top-level call on this host.
    pub fn frame(self: &Arc<Self>, signal: AbortSignal) -> NativeCall {
        NativeCall::new(Arc::clone(self) as Arc<dyn NativeHost>, signal)
    }

    /// Check the recursion limit before entering another frame.
    #[inline]
    fn check_recursion_limit(&self, depth: usize) -> Result<(), NativeError> {
        match self.config.max_call_depth {
            Some(limit) if depth >= limit => {
                tracing::debug!(depth, limit, "call depth limit reached");
                Err(NativeError::RecursionLimit { limit })
            }
            _ => Ok(()),
        }
    }

    fn call_user(&self, func: &UserFunction, args: Vec<Value>, frame: NativeCall) -> NativeFuture {
        let env = Arc::clone(&func.env).child();
        let mut args = args.into_iter();
        for &param in &func.params {
            let value = args
                .next()
                .map_or_else(|| NormalValue::new(ValueKind::Null), unwrap_value);
            match Variable::new(value) {
                Ok(slot) => env.declare(param, slot),
                Err(err) => return ready(Err(err.into())),
            }
        }
        let body = self.executor.exec_block(func.body, env, frame);
        Box::pin(async move { body.await.map(unwrap_return) })
    }
}

impl<E: StmtExecutor + 'static> NativeHost for CallHost<E> {
    #[tracing::instrument(level = "debug", skip_all, fields(depth = caller.depth()))]
    fn invoke(
        self: Arc<Self>,
        func: FunctionValue,
        args: Vec<Value>,
        caller: &NativeCall,
    ) -> NativeFuture {
        if caller.is_aborted() {
            tracing::debug!("call refused: aborted");
            return ready(Err(NativeError::Aborted));
        }
        if let Err(err) = self.check_recursion_limit(caller.depth()) {
            return ready(Err(err));
        }

        let frame = caller.enter();
        match &func {
            FunctionValue::Native(native) => {
                tracing::trace!(name = native.name(), "native call");
                native.invoke(&args, &frame).into_future()
            }
            FunctionValue::User(user) => {
                tracing::trace!(arity = user.params.len(), "user call");
                self.call_user(user, args, frame)
            }
        }
    }
}

impl<E> fmt::Debug for CallHost<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallHost")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn ready(result: Result<Value, NativeError>) -> NativeFuture {
    Box::pin(std::future::ready(result))
}
