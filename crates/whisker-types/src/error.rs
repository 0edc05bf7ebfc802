use thiserror::Error;

/// Structural failures while decoding request parameters.
///
/// Decoding stops at the first of these; no partially decoded parameter
/// object is ever handed out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid value '{value}' for '{field}': expected one of {}", .allowed.join(", "))]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("invalid value '{value}' for '{field}': expected {expected}")]
    InvalidScalar {
        field: String,
        value: String,
        expected: String,
    },

    #[error("malformed JSON document in '{field}': {reason}")]
    MalformedDocument { field: String, reason: String },

    #[error("unexpected document shape in '{field}': {reason}")]
    SchemaMismatch { field: String, reason: String },

    #[error("invalid match type '{value}' for '{field}': expected one of exact, fuzzy")]
    InvalidMatchType { field: String, value: String },
}

impl DecodeError {
    /// Name of the parameter (or document path) that failed to decode.
    pub fn field(&self) -> &str {
        match self {
            DecodeError::InvalidEnumValue { field, .. }
            | DecodeError::InvalidScalar { field, .. }
            | DecodeError::MalformedDocument { field, .. }
            | DecodeError::SchemaMismatch { field, .. }
            | DecodeError::InvalidMatchType { field, .. } => field,
        }
    }

    /// The offending raw value, when a single token is to blame.
    pub fn value(&self) -> Option<&str> {
        match self {
            DecodeError::InvalidEnumValue { value, .. }
            | DecodeError::InvalidScalar { value, .. }
            | DecodeError::InvalidMatchType { value, .. } => Some(value),
            DecodeError::MalformedDocument { .. } | DecodeError::SchemaMismatch { .. } => None,
        }
    }
}

/// A single broken business rule found by parameter validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors from turning a request query into validated parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("validation failed: {}", join_violations(.0))]
    ValidationFailed(Vec<Violation>),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Stable, machine-readable classification of a [`ParamsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamsErrorKind {
    InvalidEnumValue,
    InvalidScalar,
    MalformedDocument,
    SchemaMismatch,
    InvalidMatchType,
    ValidationFailed,
}

impl ParamsErrorKind {
    /// Error code rendered to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            ParamsErrorKind::InvalidEnumValue => "INVALID_ENUM_VALUE",
            ParamsErrorKind::InvalidScalar => "INVALID_SCALAR",
            ParamsErrorKind::MalformedDocument => "MALFORMED_DOCUMENT",
            ParamsErrorKind::SchemaMismatch => "SCHEMA_MISMATCH",
            ParamsErrorKind::InvalidMatchType => "INVALID_MATCH_TYPE",
            ParamsErrorKind::ValidationFailed => "VALIDATION_FAILED",
        }
    }
}

impl ParamsError {
    pub fn kind(&self) -> ParamsErrorKind {
        match self {
            ParamsError::Decode(DecodeError::InvalidEnumValue { .. }) => {
                ParamsErrorKind::InvalidEnumValue
            }
            ParamsError::Decode(DecodeError::InvalidScalar { .. }) => ParamsErrorKind::InvalidScalar,
            ParamsError::Decode(DecodeError::MalformedDocument { .. }) => {
                ParamsErrorKind::MalformedDocument
            }
            ParamsError::Decode(DecodeError::SchemaMismatch { .. }) => {
                ParamsErrorKind::SchemaMismatch
            }
            ParamsError::Decode(DecodeError::InvalidMatchType { .. }) => {
                ParamsErrorKind::InvalidMatchType
            }
            ParamsError::ValidationFailed(_) => ParamsErrorKind::ValidationFailed,
        }
    }
}

/// Errors from repository operations (used by trait definitions in whisker-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("flow store unavailable")]
    Unavailable,

    #[error("query error: {0}")]
    Query(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_enum_value_display() {
        let err = DecodeError::InvalidEnumValue {
            field: "sortBy".to_string(),
            value: "bogus".to_string(),
            allowed: vec!["time".to_string(), "destname".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "invalid value 'bogus' for 'sortBy': expected one of time, destname"
        );
        assert_eq!(err.field(), "sortBy");
        assert_eq!(err.value(), Some("bogus"));
    }

    #[test]
    fn test_document_errors_have_no_single_value() {
        let err = DecodeError::SchemaMismatch {
            field: "filters".to_string(),
            reason: "invalid type".to_string(),
        };
        assert_eq!(err.value(), None);
    }

    #[test]
    fn test_validation_failed_lists_every_violation() {
        let err = ParamsError::ValidationFailed(vec![
            Violation {
                field: "sortBy".to_string(),
                message: "duplicate sort key 'time'".to_string(),
            },
            Violation {
                field: "startTimeLt".to_string(),
                message: "must be greater than startTimeGte".to_string(),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("duplicate sort key"));
        assert!(text.contains("startTimeLt"));
        assert_eq!(err.kind(), ParamsErrorKind::ValidationFailed);
    }

    #[test]
    fn test_kind_codes() {
        let err: ParamsError = DecodeError::MalformedDocument {
            field: "filters".to_string(),
            reason: "EOF".to_string(),
        }
        .into();
        assert_eq!(err.kind().code(), "MALFORMED_DOCUMENT");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("timeout".to_string());
        assert_eq!(err.to_string(), "query error: timeout");
    }
}
