//! Shared delivery domain primitives.
//!
//! This crate owns the delivery record shape and request/response contracts.
//! It intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
