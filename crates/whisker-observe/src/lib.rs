//! Observability setup for Whisker: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
