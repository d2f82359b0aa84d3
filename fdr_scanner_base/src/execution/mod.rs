pub mod engine;
pub mod error;

pub use engine::{is_advisory_exit_code, Evaluator, ADVISORY_EXIT_CODES};
pub use error::EngineError;
