//! Test helpers for exercising values and native bridges in isolation.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use sable_ir::Name;

use crate::{
    EnvRef, Environment, FunctionValue, NativeCall, NativeError, NativeFuture, NativeHost,
    Value, Variable,
};

/// Flat environment with no parent chain.
#[derive(Default)]
pub struct MockEnv {
    bindings: Mutex<FxHashMap<Name, Variable>>,
}

impl MockEnv {
    pub fn shared() -> EnvRef {
        Arc::new(MockEnv::default())
    }
}

impl Environment for MockEnv {
    fn lookup(&self, name: Name) -> Option<Variable> {
        self.bindings.lock().get(&name).cloned()
    }

    fn declare(&self, name: Name, slot: Variable) {
        self.bindings.lock().insert(name, slot);
    }

    fn child(self: Arc<Self>) -> EnvRef {
        Arc::new(MockEnv::default())
    }
}

/// Host that runs native bridges directly and refuses user closures.
pub struct MockHost;

impl NativeHost for MockHost {
    fn invoke(
        self: Arc<Self>,
        func: FunctionValue,
        args: Vec<Value>,
        caller: &NativeCall,
    ) -> NativeFuture {
        match func {
            FunctionValue::Native(native) => native.invoke(&args, &caller.enter()).into_future(),
            FunctionValue::User(_) => {
                Box::pin(std::future::ready(Err(NativeError::failed("user call"))))
            }
        }
    }
}

/// Root frame on a `MockHost` with the given signal.
pub fn mock_call(signal: crate::AbortSignal) -> NativeCall {
    NativeCall::new(Arc::new(MockHost), signal)
}
