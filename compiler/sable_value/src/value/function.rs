//! Function values: user-defined closures and native bridges.
//!
//! A `FunctionValue` is exactly one of the two shapes, so a function with
//! both or neither payload cannot be built.

use std::fmt;
use std::sync::Arc;

use sable_ir::{Name, StmtRange};

use super::{Heap, Value};
use crate::errors::{NativeError, NativeResult};
use crate::native::{NativeCall, NativeFuture};
use crate::variable::Variable;

/// Captured environment of a closure.
///
/// The value layer stores it verbatim. Only the host that invokes the
/// closure calls these methods.
pub trait Environment: Send + Sync {
    /// Find the binding slot for `name`, searching enclosing scopes.
    fn lookup(&self, name: Name) -> Option<Variable>;

    /// Introduce a binding in this scope, shadowing outer ones.
    fn declare(&self, name: Name, slot: Variable);

    /// A fresh scope whose parent is this one.
    fn child(self: Arc<Self>) -> EnvRef;
}

/// Shared handle to a captured environment.
pub type EnvRef = Arc<dyn Environment>;

/// Host-side procedure behind a native bridge.
///
/// Receives the call's arguments and the operations bundle for the
/// in-flight call.
pub type NativeFn = dyn Fn(&[Value], &NativeCall) -> NativeOutput + Send + Sync;

/// What a native bridge hands back.
pub enum NativeOutput {
    /// Completed synchronously.
    Ready(NativeResult),
    /// Completes later; the host awaits it.
    Pending(NativeFuture),
}

impl NativeOutput {
    /// Bridges that produce nothing yield `null`.
    pub fn void() -> Self {
        NativeOutput::Ready(Ok(Value::NULL))
    }

    /// Normalize to a future the host can await.
    pub fn into_future(self) -> NativeFuture {
        match self {
            NativeOutput::Ready(result) => Box::pin(std::future::ready(result)),
            NativeOutput::Pending(future) => future,
        }
    }
}

impl From<Value> for NativeOutput {
    fn from(value: Value) -> Self {
        NativeOutput::Ready(Ok(value))
    }
}

impl From<NativeError> for NativeOutput {
    fn from(error: NativeError) -> Self {
        NativeOutput::Ready(Err(error))
    }
}

impl From<NativeFuture> for NativeOutput {
    fn from(future: NativeFuture) -> Self {
        NativeOutput::Pending(future)
    }
}

impl fmt::Debug for NativeOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeOutput::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            NativeOutput::Pending(_) => write!(f, "Pending(..)"),
        }
    }
}

/// User-defined closure record.
pub struct UserFunction {
    /// Parameter names, in declaration order.
    pub params: Vec<Name>,
    /// Body statements, replayed by the evaluator on each call.
    pub body: StmtRange,
    /// Environment captured at creation.
    pub env: EnvRef,
}

impl fmt::Debug for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFunction")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// Native bridge: a host procedure exposed as a callable value.
#[derive(Clone)]
pub struct NativeFunction {
    name: Option<&'static str>,
    func: Arc<NativeFn>,
}

impl NativeFunction {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value], &NativeCall) -> NativeOutput + Send + Sync + 'static,
    {
        NativeFunction {
            name: None,
            func: Arc::new(func),
        }
    }

    /// A bridge with a name for diagnostics.
    pub fn named<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(&[Value], &NativeCall) -> NativeOutput + Send + Sync + 'static,
    {
        NativeFunction {
            name: Some(name),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Run the host procedure. Only hosts call this; scripts go through
    /// [`NativeCall::call`].
    pub fn invoke(&self, args: &[Value], call: &NativeCall) -> NativeOutput {
        (self.func)(args, call)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "NativeFunction({name})"),
            None => write!(f, "NativeFunction"),
        }
    }
}

/// Callable value.
#[derive(Clone)]
pub enum FunctionValue {
    User(Heap<UserFunction>),
    Native(NativeFunction),
}

impl FunctionValue {
    pub(super) fn user(params: Vec<Name>, body: StmtRange, env: EnvRef) -> Self {
        FunctionValue::User(Heap::new(UserFunction { params, body, env }))
    }

    #[inline]
    pub fn is_native(&self) -> bool {
        matches!(self, FunctionValue::Native(_))
    }

    pub fn as_user(&self) -> Option<&UserFunction> {
        match self {
            FunctionValue::User(func) => Some(func),
            FunctionValue::Native(_) => None,
        }
    }

    pub fn as_native(&self) -> Option<&NativeFunction> {
        match self {
            FunctionValue::Native(func) => Some(func),
            FunctionValue::User(_) => None,
        }
    }

    /// Function identity: both handles refer to the same closure or bridge.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FunctionValue::User(a), FunctionValue::User(b)) => a.ptr_eq(b),
            (FunctionValue::Native(a), FunctionValue::Native(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionValue::User(func) => fmt::Debug::fmt(&**func, f),
            FunctionValue::Native(func) => fmt::Debug::fmt(func, f),
        }
    }
}
