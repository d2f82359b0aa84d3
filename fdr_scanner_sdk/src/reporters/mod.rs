//! Reporter implementations and their registry

pub mod registry;
pub mod text;

pub use registry::{ReporterFactory, ReporterRegistry};
pub use text::{TextReporter, TEXT_REPORTER_TYPE};
