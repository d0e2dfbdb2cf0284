//! Sable Value - runtime value algebra for the Sable scripting language.
//!
//! This crate provides:
//! - The closed set of runtime values (`Value`, `NormalValue`, `ValueKind`),
//!   including `return`/`break`/`continue` as ordinary values
//! - Attribute decoration orthogonal to the value's tag (`Attributes`)
//! - Binding slots distinct from plain values (`Variable`)
//! - The two unwrap steps applied before a result is used
//!   (`unwrap_return`, `unwrap_value`)
//! - The native-bridge calling convention (`NativeCall`, `NativeHost`) and
//!   abort signalling (`AbortController`, `AbortSignal`)
//!
//! Nothing here executes scripts. The evaluator builds values with the
//! `Value::` factory methods, branches on `tag()`, and plugs its call
//! machinery in through `NativeHost` and `Environment`.

mod errors;
mod native;
mod unwrap;
mod value;
mod variable;

#[cfg(test)]
mod test_helpers;

pub use errors::{NativeError, NativeResult, ValueError};
pub use native::{
    AbortController, AbortHandlerId, AbortSignal, NativeCall, NativeFuture, NativeHost,
};
pub use unwrap::{unwrap_return, unwrap_value};
pub use value::{
    Attribute, Attributes, EnvRef, Environment, FunctionValue, Heap, NativeFn, NativeFunction,
    NativeOutput, NormalValue, ObjMap, Shared, UserFunction, Value, ValueKind, ValueTag,
};
pub use variable::Variable;
