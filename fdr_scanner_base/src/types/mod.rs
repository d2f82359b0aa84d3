//! Core data types shared by parser, resolver and engine

pub mod criterion;
pub mod device;

pub use criterion::{CriteriaSet, Criterion};
pub use device::{Device, DeviceCollection, DeviceError};
