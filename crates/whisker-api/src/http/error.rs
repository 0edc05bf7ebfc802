//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use whisker_types::error::{ParamsError, RepositoryError};

use crate::http::response::{ApiErrorDetail, ApiResponse};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The request query could not be decoded or broke a rule.
    Params(ParamsError),
    /// The flow store failed.
    Repository(RepositoryError),
}

impl From<ParamsError> for AppError {
    fn from(e: ParamsError) -> Self {
        AppError::Params(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Params(_) => StatusCode::BAD_REQUEST,
            AppError::Repository(RepositoryError::Unavailable) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Envelope error entries for this error.
    pub fn details(&self) -> Vec<ApiErrorDetail> {
        match self {
            AppError::Params(err) => params_error_details(err),
            AppError::Repository(e @ RepositoryError::Unavailable) => {
                vec![detail("FLOW_STORE_UNAVAILABLE", e.to_string(), None)]
            }
            AppError::Repository(e) => vec![detail("FLOW_QUERY_ERROR", e.to_string(), None)],
        }
    }
}

/// Render a parameter error as envelope entries.
///
/// A decode error becomes one entry naming the field (and value, when a
/// single token is to blame); a validation failure becomes one entry per
/// violation, so clients can show every problem at once.
pub fn params_error_details(err: &ParamsError) -> Vec<ApiErrorDetail> {
    let code = err.kind().code();
    match err {
        ParamsError::Decode(decode) => {
            let mut context = json!({ "field": decode.field() });
            if let Some(value) = decode.value() {
                context["value"] = json!(value);
            }
            vec![detail(code, decode.to_string(), Some(context))]
        }
        ParamsError::ValidationFailed(violations) => violations
            .iter()
            .map(|v| detail(code, v.message.clone(), Some(json!({ "field": v.field }))))
            .collect(),
    }
}

fn detail(code: &str, message: String, details: Option<serde_json::Value>) -> ApiErrorDetail {
    ApiErrorDetail {
        code: code.to_string(),
        message,
        details,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = uuid::Uuid::now_v7().to_string();
        (self.status(), ApiResponse::failure(self.details(), request_id)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whisker_types::error::{DecodeError, Violation};

    #[test]
    fn decode_error_detail_names_field_and_value() {
        let err = AppError::from(ParamsError::from(DecodeError::InvalidEnumValue {
            field: "sortBy".to_string(),
            value: "bogus".to_string(),
            allowed: vec!["time".to_string()],
        }));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let details = err.details();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].code, "INVALID_ENUM_VALUE");
        assert_eq!(
            details[0].details,
            Some(json!({ "field": "sortBy", "value": "bogus" }))
        );
    }

    #[test]
    fn document_error_detail_has_no_value() {
        let details = params_error_details(&ParamsError::from(DecodeError::MalformedDocument {
            field: "filters".to_string(),
            reason: "EOF while parsing".to_string(),
        }));
        assert_eq!(details[0].details, Some(json!({ "field": "filters" })));
    }

    #[test]
    fn validation_failure_yields_one_entry_per_violation() {
        let err = ParamsError::ValidationFailed(vec![
            Violation {
                field: "watch".to_string(),
                message: "cannot be combined with startTimeLt".to_string(),
            },
            Violation {
                field: "filters.DestPorts[0]".to_string(),
                message: "port must be between 1 and 65535, got 0".to_string(),
            },
        ]);
        let details = params_error_details(&err);
        assert_eq!(details.len(), 2);
        assert!(details.iter().all(|d| d.code == "VALIDATION_FAILED"));
        assert_eq!(details[1].details, Some(json!({ "field": "filters.DestPorts[0]" })));
    }

    #[test]
    fn repository_errors_map_to_server_statuses() {
        assert_eq!(
            AppError::from(RepositoryError::Unavailable).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::from(RepositoryError::Query("boom".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn into_response_uses_error_status() {
        let response = AppError::from(RepositoryError::Unavailable).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
