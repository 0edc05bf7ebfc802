//! Flow listing handler for the REST API.

use std::time::Instant;

use axum::extract::State;

use whisker_core::repository::flow::FlowRepository;
use whisker_types::flow::ListFlowsParams;

use crate::http::error::AppError;
use crate::http::extractors::params::ValidatedQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/flows - List flows with filtering and sorting.
pub async fn list_flows<R: FlowRepository + 'static>(
    State(state): State<AppState<R>>,
    ValidatedQuery(params): ValidatedQuery<ListFlowsParams>,
) -> Result<ApiResponse<Vec<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let flows = state.flows.list(&params).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    tracing::debug!(
        request_id = %request_id,
        flows = flows.len(),
        sort_keys = params.sort_by.len(),
        filtered = !params.filters.is_empty(),
        watch = params.watch,
        "Listed flows"
    );

    Ok(ApiResponse::success(flows, request_id, elapsed).with_link("self", "/api/v1/flows"))
}
