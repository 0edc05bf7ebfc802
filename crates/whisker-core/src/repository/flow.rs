//! Flow repository trait definition.

use whisker_types::error::RepositoryError;
use whisker_types::flow::ListFlowsParams;

/// Read access to stored flow records.
///
/// Records are opaque JSON: their wire format belongs to the store. The
/// store applies `params` (filters, sort order, time window) itself.
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait FlowRepository: Send + Sync {
    /// List flows matching validated request parameters.
    fn list(
        &self,
        params: &ListFlowsParams,
    ) -> impl std::future::Future<Output = Result<Vec<serde_json::Value>, RepositoryError>> + Send;
}
