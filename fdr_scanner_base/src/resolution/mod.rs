//! # Criteria Resolver
//!
//! Finds the observed value for a [`Criterion`](crate::types::Criterion) in a
//! device's detail record. Attribute tables are matched row by row; other
//! keys are read directly.

pub mod error;
pub mod resolver;

pub use error::ResolveError;
pub use resolver::{resolve, LookupStrategy};
