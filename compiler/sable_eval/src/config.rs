//! Call host configuration.

/// Nesting limit used when none is configured.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Settings for a [`CallHost`](crate::CallHost).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostConfig {
    /// Deepest call nesting allowed; `None` disables the check.
    pub max_call_depth: Option<usize>,
}

impl HostConfig {
    #[must_use]
    pub fn with_max_call_depth(mut self, limit: Option<usize>) -> Self {
        self.max_call_depth = limit;
        self
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
        }
    }
}
