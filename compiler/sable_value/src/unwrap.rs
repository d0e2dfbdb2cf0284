//! The two unwrap steps the evaluator applies before using a result.
//!
//! They are independent and compose in either order:
//!
//! ```text
//! let v = unwrap_value(unwrap_return(result));
//! ```

use crate::value::{NormalValue, Value};

/// Yield the payload of a `return` signal, or `value` unchanged.
///
/// Applied by call machinery to the result of a function body.
pub fn unwrap_return(value: Value) -> Value {
    let payload = match &value {
        Value::Normal(normal) => normal.return_payload().cloned(),
        Value::Variable(_) => None,
    };
    payload.unwrap_or(value)
}

/// Yield the contents of a binding slot, or `value` unchanged.
///
/// Applied whenever a stored binding is read in expression position.
/// Slots never nest, so one application always reaches a normal value.
pub fn unwrap_value(value: Value) -> NormalValue {
    match value {
        Value::Normal(normal) => normal,
        Value::Variable(slot) => slot.get(),
    }
}
