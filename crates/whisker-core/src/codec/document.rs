//! JSON documents embedded in a single query-string value.
//!
//! Decoding is purely structural. Unknown object fields are ignored so older
//! servers accept documents from newer clients; missing required fields and
//! wrong value types are shape errors.

use std::fmt;
use std::marker::PhantomData;

use serde::de::value::MapAccessDeserializer;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::error::Category;

use whisker_types::error::DecodeError;

/// Parse `raw` as a JSON document of shape `T`.
///
/// - invalid JSON syntax or truncated input: [`DecodeError::MalformedDocument`]
/// - valid JSON that does not fit `T`: [`DecodeError::SchemaMismatch`]
pub fn decode_document<T: DeserializeOwned>(field: &str, raw: &str) -> Result<T, DecodeError> {
    serde_json::from_str(raw).map_err(|err| classify(field, err))
}

/// `deserialize_with` helper that accepts only a JSON object.
///
/// Derived struct impls also take a sequence and fill fields by position,
/// which would let `["api", "fuzzy"]` stand in for `{"V": "api", "Type": "fuzzy"}`.
pub fn deserialize_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    deserializer.deserialize_map(ObjectVisitor(PhantomData))
}

struct ObjectVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ObjectVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<T, A::Error> {
        T::deserialize(MapAccessDeserializer::new(map))
    }
}

fn classify(field: &str, err: serde_json::Error) -> DecodeError {
    match err.classify() {
        Category::Data => DecodeError::SchemaMismatch {
            field: field.to_string(),
            reason: err.to_string(),
        },
        Category::Syntax | Category::Eof | Category::Io => DecodeError::MalformedDocument {
            field: field.to_string(),
            reason: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Window {
        start: i64,
        #[serde(default)]
        labels: Vec<String>,
    }

    #[test]
    fn decodes_and_ignores_unknown_fields() {
        let window: Window =
            decode_document("window", r#"{"start": 10, "labels": ["a"], "extra": true}"#).unwrap();
        assert_eq!(
            window,
            Window {
                start: 10,
                labels: vec!["a".to_string()]
            }
        );
    }

    #[test]
    fn syntax_errors_are_malformed() {
        for raw in [r#"{"start": 10"#, "{start: 10}", "", r#"{"start": 1} trailing"#] {
            let err = decode_document::<Window>("window", raw).unwrap_err();
            assert!(
                matches!(err, DecodeError::MalformedDocument { ref field, .. } if field == "window"),
                "{raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn wrong_shape_is_schema_mismatch() {
        for raw in [r#"{"start": "ten"}"#, r#"{"labels": []}"#, "[1, 2]", "42"] {
            let err = decode_document::<Window>("window", raw).unwrap_err();
            assert!(
                matches!(err, DecodeError::SchemaMismatch { .. }),
                "{raw:?} gave {err:?}"
            );
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct StrictWindow(#[serde(deserialize_with = "deserialize_object")] Window);

    #[test]
    fn object_only_rejects_positional_arrays() {
        // A derived struct alone accepts this by position.
        assert!(decode_document::<Window>("window", r#"[10, ["a"]]"#).is_ok());

        let err = decode_document::<StrictWindow>("window", r#"[10, ["a"]]"#).unwrap_err();
        assert!(matches!(err, DecodeError::SchemaMismatch { .. }), "{err:?}");

        let StrictWindow(window) =
            decode_document("window", r#"{"start": 3, "extra": null}"#).unwrap();
        assert_eq!(window.start, 3);
    }
}
