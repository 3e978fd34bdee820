//! Tree traversal and line matching.
//!
//! The walker drives a single-threaded, depth-first traversal and hands every
//! file that passes the filters to the [`FileMatcher`], which appends to a
//! [`ResultSet`](crate::results::ResultSet) borrowed for the duration of the
//! walk. The engine runs the walk to completion before any report is built.
pub mod engine;
pub mod matcher;
pub mod walker;

pub use engine::{run, run_in, search_in, RunSummary, DEFAULT_OUTPUT};
pub use matcher::{FileMatcher, LiteralMatcher};
pub use walker::walk;
