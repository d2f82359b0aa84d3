use crate::parser::ParseError;

/// Failure to resolve one criterion against a detail record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Direct lookup found nothing at `key.name`
    #[error("No value at '{key}.{name}'")]
    MissingCriterion { key: String, name: String },

    #[error(transparent)]
    Malformed(#[from] ParseError),
}
