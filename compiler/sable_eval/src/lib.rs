//! Sable Eval - reference scope and call host for the Sable value layer.
//!
//! `sable_value` defines what a value is. This crate supplies the two
//! pieces an evaluator plugs into it:
//! - [`Scope`]: lexical binding storage handing out `Variable` slots
//! - [`CallHost`]: the `NativeHost` that invokes closures and native bridges,
//!   delegating statement execution to a [`StmtExecutor`]

mod call;
mod config;
mod environment;

pub use call::{CallHost, StmtExecutor};
pub use config::{HostConfig, DEFAULT_MAX_CALL_DEPTH};
pub use environment::{AssignError, Mutability, Scope};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Call this early in main() or test setup to enable tracing.
/// Uses `RUST_LOG` environment variable for filtering.
///
/// Example: `RUST_LOG=sable_eval=debug cargo run`
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
