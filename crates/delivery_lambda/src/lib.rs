//! AWS-oriented adapters and handlers for the delivery request lambdas.
//!
//! This crate owns runtime integration details (Lambda handlers, DynamoDB
//! storage, configuration and logging) on top of the contracts defined in
//! `delivery_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod telemetry;
