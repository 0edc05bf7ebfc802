//! Wire form of filter entries and their normalization into [`FilterMatch`].
//!
//! An entry is either a bare JSON scalar (`"api"`, `443`) or an object
//! `{"V": <value>, "Type"?: "exact"|"fuzzy"}`. The match type is kept as a
//! raw string while parsing so an unknown literal surfaces as
//! [`DecodeError::InvalidMatchType`] instead of a generic shape error, and
//! a missing one is filled with [`MatchType::Exact`] during normalization.

use serde::Deserialize;

use whisker_types::error::DecodeError;
use whisker_types::flow::{FilterMatch, MatchType};

use super::document::deserialize_object;
use super::QueryToken;

/// One filter entry exactly as it appears in the request document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireMatch<T> {
    Bare(T),
    Object(#[serde(deserialize_with = "deserialize_object")] WireMatchObject<T>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireMatchObject<T> {
    #[serde(rename = "V")]
    pub v: T,
    #[serde(rename = "Type", default)]
    pub match_type: Option<String>,
}

impl<T> WireMatch<T> {
    /// Resolve the match type, defaulting to exact. `field` names the entry
    /// in error messages.
    pub fn normalize(self, field: &str) -> Result<FilterMatch<T>, DecodeError> {
        match self {
            WireMatch::Bare(v) => Ok(FilterMatch::exact(v)),
            WireMatch::Object(WireMatchObject { v, match_type }) => {
                let match_type = resolve_match_type(field, match_type.as_deref())?;
                Ok(FilterMatch::new(v, match_type))
            }
        }
    }
}

/// Normalize every entry of one filter dimension, stopping at the first bad one.
pub fn normalize_matches<T>(
    field: &str,
    entries: Vec<WireMatch<T>>,
) -> Result<Vec<FilterMatch<T>>, DecodeError> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| entry.normalize(&format!("{field}[{index}]")))
        .collect()
}

fn resolve_match_type(field: &str, raw: Option<&str>) -> Result<MatchType, DecodeError> {
    match raw {
        None => Ok(MatchType::Exact),
        Some(token) => MatchType::parse_token(token).ok_or_else(|| DecodeError::InvalidMatchType {
            field: field.to_string(),
            value: token.to_string(),
        }),
    }
}
