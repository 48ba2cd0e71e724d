pub mod analysis;
pub mod config;
pub mod curry;
pub mod errors;
pub mod extract;
pub mod pipe;
pub mod response_formatter;
pub mod service;
pub mod tool_router;
pub mod tools;
pub mod tree;
pub mod types;

// Re-export commonly used types
pub use analysis::{AnalysisRun, Candidate, Detection, FixOutcome, RuleId};
pub use service::RefactorService;
pub use types::*;
