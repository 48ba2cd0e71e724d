//! # Pipe Analysis
//!
//! Detects runs of sequential single-argument calls threaded through
//! throwaway variables and rewrites them into one composed `pipe`
//! expression.

pub mod chain;
pub mod rewrite;

pub use chain::{PipeCandidate, PipePart, build_pipe_candidate};
pub use rewrite::apply_pipe_fix;

/// Name of the composition helper the rewriter emits and the detector
/// treats as already-piped code.
pub const PIPE_HELPER_NAME: &str = "pipe";
