//! Query-string extractor for typed, validated request parameters.
//!
//! `ValidatedQuery<P>` runs the full decode-and-validate pipeline of
//! `whisker-core` on the request URI. Any failure rejects the request with
//! `400 Bad Request` and a per-field error envelope.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use whisker_core::params::{decode_and_validate, QueryParams, QueryValues};
use whisker_types::config::ParamLimits;

use crate::http::error::AppError;

/// Decoded and validated query parameters of type `P`.
#[derive(Debug)]
pub struct ValidatedQuery<P>(pub P);

impl<S, P> FromRequestParts<S> for ValidatedQuery<P>
where
    P: QueryParams + Send,
    ParamLimits: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query = QueryValues::parse(parts.uri.query().unwrap_or_default());
        let limits = ParamLimits::from_ref(state);

        match decode_and_validate::<P>(&query, &limits) {
            Ok(params) => Ok(ValidatedQuery(params)),
            Err(err) => {
                tracing::warn!(
                    params = P::NAME,
                    kind = err.kind().code(),
                    error = %err,
                    "Rejected request parameters"
                );
                Err(AppError::Params(err))
            }
        }
    }
}
