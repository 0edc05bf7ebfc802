//! Shared domain types for Whisker.
//!
//! This crate contains the request-parameter types of the flow listing API,
//! their error types, and configuration types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod flow;
