//! Request extractors.

pub mod params;
