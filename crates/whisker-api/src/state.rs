//! Shared application state for the REST API.
//!
//! AppState is generic over the flow repository so the store (external to
//! this workspace) can be plugged in by whoever hosts the router.

use std::sync::Arc;

use axum::extract::FromRef;

use whisker_core::repository::flow::FlowRepository;
use whisker_types::config::ParamLimits;

/// Shared application state handed to every handler.
pub struct AppState<R> {
    pub flows: Arc<R>,
    pub limits: Arc<ParamLimits>,
}

impl<R: FlowRepository> AppState<R> {
    pub fn new(flows: R, limits: ParamLimits) -> Self {
        Self {
            flows: Arc::new(flows),
            limits: Arc::new(limits),
        }
    }
}

// Manual impl: `R` itself does not need to be `Clone`.
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            flows: Arc::clone(&self.flows),
            limits: Arc::clone(&self.limits),
        }
    }
}

impl<R> FromRef<AppState<R>> for ParamLimits {
    fn from_ref(state: &AppState<R>) -> Self {
        state.limits.as_ref().clone()
    }
}
