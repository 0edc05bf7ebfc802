//! Codecs turning raw query-string values into typed fields.
//!
//! - [`QueryToken`]: one token <-> one value (closed enums and plain scalars)
//! - [`document`]: a JSON document carried inside a single query value
//! - [`matching`]: filter entries with an optional match type

pub mod document;
pub mod matching;

use whisker_types::error::DecodeError;
use whisker_types::flow::{Action, ListFlowsSortBy, MatchType};

/// A value carried on the wire as a single query-string token.
///
/// Closed enumerations list their canonical tokens in [`allowed_tokens`];
/// open scalars (numbers, booleans) leave it empty. Tokens are matched
/// exactly: no trimming, no case folding.
///
/// [`allowed_tokens`]: QueryToken::allowed_tokens
pub trait QueryToken: Sized {
    /// Description of the accepted form, used in error messages.
    const EXPECTED: &'static str;

    /// Parse a token, `None` if it is outside the value space.
    fn parse_token(token: &str) -> Option<Self>;

    /// The canonical token for this value.
    fn to_token(&self) -> String;

    /// Canonical tokens of a closed set. Empty for open scalars.
    fn allowed_tokens() -> Vec<String> {
        Vec::new()
    }
}

/// Decode a single token of `field`.
///
/// Closed enums fail with [`DecodeError::InvalidEnumValue`], open scalars
/// with [`DecodeError::InvalidScalar`].
pub fn decode_token<T: QueryToken>(field: &str, token: &str) -> Result<T, DecodeError> {
    T::parse_token(token).ok_or_else(|| {
        let allowed = T::allowed_tokens();
        if allowed.is_empty() {
            DecodeError::InvalidScalar {
                field: field.to_string(),
                value: token.to_string(),
                expected: T::EXPECTED.to_string(),
            }
        } else {
            DecodeError::InvalidEnumValue {
                field: field.to_string(),
                value: token.to_string(),
                allowed,
            }
        }
    })
}

/// Encode a value as its canonical token.
pub fn encode_token<T: QueryToken>(value: &T) -> String {
    value.to_token()
}

impl QueryToken for ListFlowsSortBy {
    const EXPECTED: &'static str = "a sort key";

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    fn to_token(&self) -> String {
        self.as_str().to_string()
    }

    fn allowed_tokens() -> Vec<String> {
        Self::ALL.iter().map(|key| key.as_str().to_string()).collect()
    }
}

impl QueryToken for MatchType {
    const EXPECTED: &'static str = "a match type";

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    fn to_token(&self) -> String {
        self.as_str().to_string()
    }

    fn allowed_tokens() -> Vec<String> {
        Self::ALL.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl QueryToken for Action {
    const EXPECTED: &'static str = "an action";

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    fn to_token(&self) -> String {
        self.as_str().to_string()
    }

    fn allowed_tokens() -> Vec<String> {
        Self::ALL.iter().map(|a| a.as_str().to_string()).collect()
    }
}

impl QueryToken for bool {
    const EXPECTED: &'static str = "'true' or 'false'";

    fn parse_token(token: &str) -> Option<Self> {
        match token {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    fn to_token(&self) -> String {
        self.to_string()
    }
}

impl QueryToken for i64 {
    const EXPECTED: &'static str = "a decimal integer";

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    fn to_token(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_tokens_roundtrip() {
        for token in ListFlowsSortBy::allowed_tokens() {
            let key: ListFlowsSortBy = decode_token("sortBy", &token).unwrap();
            assert_eq!(encode_token(&key), token);
        }
    }

    #[test]
    fn unknown_sort_key_is_invalid_enum_value() {
        for token in ["bogus", "DestName", "destname ", ""] {
            let err = decode_token::<ListFlowsSortBy>("sortBy", token).unwrap_err();
            match err {
                DecodeError::InvalidEnumValue {
                    field,
                    value,
                    allowed,
                } => {
                    assert_eq!(field, "sortBy");
                    assert_eq!(value, token);
                    assert!(allowed.contains(&"destname".to_string()));
                }
                other => panic!("expected InvalidEnumValue, got {other:?}"),
            }
        }
    }

    #[test]
    fn bool_accepts_only_canonical_literals() {
        assert!(decode_token::<bool>("watch", "true").unwrap());
        assert!(!decode_token::<bool>("watch", "false").unwrap());
        let err = decode_token::<bool>("watch", "1").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidScalar { .. }));
    }

    #[test]
    fn integer_scalar_errors_name_the_expected_form() {
        assert_eq!(decode_token::<i64>("startTimeGte", "-300").unwrap(), -300);
        let err = decode_token::<i64>("startTimeGte", "yesterday").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value 'yesterday' for 'startTimeGte': expected a decimal integer"
        );
    }

    #[test]
    fn action_tokens() {
        assert_eq!(decode_token::<Action>("actions", "deny").unwrap(), Action::Deny);
        assert!(matches!(
            decode_token::<Action>("actions", "Deny"),
            Err(DecodeError::InvalidEnumValue { .. })
        ));
    }
}
