//! Error types owned by the value layer.
//!
//! The value layer has exactly one construction error. `NativeError` is the
//! error channel of native-bridge futures; evaluators convert it into their
//! own error kind at the call boundary.

use crate::value::{Value, ValueTag};

/// Result of a native-bridge or host call.
pub type NativeResult = Result<Value, NativeError>;

/// A value could not be built in the requested shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Boxing a control signal or an existing variable into a binding slot.
    #[error("invalid value construction: cannot store `{tag}` in a variable")]
    InvalidValueConstruction { tag: ValueTag },
}

/// Failure of a native-bridge invocation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NativeError {
    /// The bridge reported a failure.
    #[error("{message}")]
    Failed { message: String },
    /// The in-flight call was aborted.
    #[error("call aborted")]
    Aborted,
    /// The host refused to nest calls any deeper.
    #[error("maximum call depth exceeded (limit: {limit})")]
    RecursionLimit { limit: usize },
    #[error(transparent)]
    InvalidValue(#[from] ValueError),
}

impl NativeError {
    /// Create a failure with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        NativeError::Failed {
            message: message.into(),
        }
    }
}
