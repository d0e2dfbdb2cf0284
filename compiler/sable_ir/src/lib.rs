//! Sable IR - identifiers shared by the parser, evaluator and value layer.
//!
//! The value layer never looks inside these; a user-defined function stores
//! its parameter `Name`s and body `StmtRange` verbatim and the evaluator
//! interprets them on invocation.

mod interner;
mod name;
mod stmt_id;

pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use stmt_id::{StmtId, StmtRange};
