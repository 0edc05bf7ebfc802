//! Query-string decoding into typed parameter objects.
//!
//! Each parameter type declares its fields once in a [`ParamDescriptor`]:
//! the query key a field is read from and the strategy used to decode it.
//! Nothing is inferred from the request data at runtime.
//!
//! Decoding is fail-fast (first structural error wins, no partial object),
//! then [`QueryParams::validate`] runs and reports every rule violation.

pub mod flows;

use serde::de::DeserializeOwned;

use whisker_types::config::ParamLimits;
use whisker_types::error::{DecodeError, ParamsError};

use crate::codec::document::decode_document;
use crate::codec::{decode_token, QueryToken};
use crate::validate::Violations;

/// Query-string values in request order, keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    pairs: Vec<(String, String)>,
}

impl QueryValues {
    /// Parse a raw `application/x-www-form-urlencoded` query string.
    /// A single leading `?` is ignored.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        url::form_urlencoded::parse(raw.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }

    /// All values of `key`, in the order they appeared.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(String, String)> for QueryValues {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// How a field is sourced from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Exactly one value, decoded as a [`QueryToken`].
    Scalar,
    /// Every value of the key, each decoded as a [`QueryToken`], in order.
    RepeatedScalar,
    /// Exactly one value holding a JSON document.
    SubDocument,
}

type ApplyFn<P> = Box<dyn Fn(&mut P, &[&str]) -> Result<(), DecodeError> + Send + Sync>;

struct FieldEntry<P> {
    key: &'static str,
    strategy: Strategy,
    apply: ApplyFn<P>,
}

/// Declarative field layout of a parameter type.
///
/// Built once per type (see [`QueryParams::descriptor`]) with the typed
/// registration methods below; the setter closures fix the target field
/// and the decoded type at compile time.
pub struct ParamDescriptor<P> {
    fields: Vec<FieldEntry<P>>,
}

impl<P> Default for ParamDescriptor<P> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<P: 'static> ParamDescriptor<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field read from the single value of `key`.
    pub fn scalar<T, F>(self, key: &'static str, set: F) -> Self
    where
        T: QueryToken + 'static,
        F: Fn(&mut P, T) + Send + Sync + 'static,
    {
        self.register(key, Strategy::Scalar, move |params, values| {
            let token = single_value(key, values)?;
            set(params, decode_token(key, token)?);
            Ok(())
        })
    }

    /// Field read from every value of `key`, preserving their order.
    pub fn repeated<T, F>(self, key: &'static str, set: F) -> Self
    where
        T: QueryToken + 'static,
        F: Fn(&mut P, Vec<T>) + Send + Sync + 'static,
    {
        self.register(key, Strategy::RepeatedScalar, move |params, values| {
            let decoded = values
                .iter()
                .map(|token| decode_token(key, token))
                .collect::<Result<Vec<T>, _>>()?;
            set(params, decoded);
            Ok(())
        })
    }

    /// Field read from a JSON document in the single value of `key`.
    ///
    /// `set` receives the parsed wire shape `W` and may reject it, which is
    /// where post-parse normalization (e.g. match-type defaults) happens.
    pub fn document<W, F>(self, key: &'static str, set: F) -> Self
    where
        W: DeserializeOwned + 'static,
        F: Fn(&mut P, W) -> Result<(), DecodeError> + Send + Sync + 'static,
    {
        self.register(key, Strategy::SubDocument, move |params, values| {
            let raw = single_value(key, values)?;
            let document = decode_document::<W>(key, raw)?;
            set(params, document)
        })
    }

    fn register<F>(mut self, key: &'static str, strategy: Strategy, apply: F) -> Self
    where
        F: Fn(&mut P, &[&str]) -> Result<(), DecodeError> + Send + Sync + 'static,
    {
        debug_assert!(
            self.fields.iter().all(|f| f.key != key),
            "query key '{key}' registered twice"
        );
        self.fields.push(FieldEntry {
            key,
            strategy,
            apply: Box::new(apply),
        });
        self
    }

    /// Registered `(key, strategy)` pairs, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Strategy)> + '_ {
        self.fields.iter().map(|f| (f.key, f.strategy))
    }

    /// Decode `query` into a fresh `P`. Absent keys leave the field at its
    /// default; unknown keys are ignored.
    pub fn decode(&self, query: &QueryValues) -> Result<P, DecodeError>
    where
        P: Default,
    {
        let mut params = P::default();
        for field in &self.fields {
            let values = query.get_all(field.key);
            if values.is_empty() {
                continue;
            }
            (field.apply)(&mut params, &values)?;
        }

        for key in query.keys() {
            if self.fields.iter().all(|f| f.key != key) {
                tracing::debug!(key, "Ignoring unknown query parameter");
            }
        }

        Ok(params)
    }
}

fn single_value<'a>(key: &str, values: &[&'a str]) -> Result<&'a str, DecodeError> {
    match values {
        [value] => Ok(*value),
        _ => Err(DecodeError::SchemaMismatch {
            field: key.to_string(),
            reason: format!("expected a single value, got {}", values.len()),
        }),
    }
}

/// A request parameter type decodable from a query string.
pub trait QueryParams: Default + Sized + 'static {
    /// Type name used in logs.
    const NAME: &'static str;

    /// The field layout, built once and shared by every request.
    fn descriptor() -> &'static ParamDescriptor<Self>;

    /// Check cross-field and business rules, recording every violation.
    fn validate(&self, limits: &ParamLimits, violations: &mut Violations);
}

/// Decode without running validation.
pub fn decode_params<P: QueryParams>(query: &QueryValues) -> Result<P, DecodeError> {
    P::descriptor().decode(query)
}

/// Decode `query` into `P`, then validate it.
///
/// Structural errors come back one at a time as [`ParamsError::Decode`];
/// rule violations come back together as [`ParamsError::ValidationFailed`].
pub fn decode_and_validate<P: QueryParams>(
    query: &QueryValues,
    limits: &ParamLimits,
) -> Result<P, ParamsError> {
    let params = decode_params::<P>(query)?;

    let mut violations = Violations::default();
    params.validate(limits, &mut violations);
    if !violations.is_empty() {
        tracing::debug!(
            params = P::NAME,
            violations = violations.len(),
            "Request parameters failed validation"
        );
    }
    violations.into_result()?;

    Ok(params)
}
