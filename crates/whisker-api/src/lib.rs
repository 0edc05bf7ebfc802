//! HTTP adapter for Whisker's flow listing API.
//!
//! Hosts the axum router, the validated-query extractor, the error
//! envelope, and configuration loading. The flow store is supplied by the
//! embedding service through [`whisker_core::repository::flow::FlowRepository`].

pub mod config;
pub mod http;
pub mod state;
