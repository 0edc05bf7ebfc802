//! Request-parameter decoding and validation for Whisker.
//!
//! Turns a raw query string into a typed, validated parameter object and
//! defines the flow repository port that consumes it. Depends only on
//! `whisker-types` -- never on any HTTP or storage crate.

pub mod codec;
pub mod params;
pub mod repository;
pub mod validate;

pub use params::{decode_and_validate, decode_params, ParamDescriptor, QueryParams, QueryValues};
