//! Request parameters for listing network flows.
//!
//! These are plain value types: they carry the decoded, validated *intent*
//! of a list request (how to sort, what to filter) and never touch flow
//! data themselves. Decoding from a query string lives in `whisker-core`.

use serde::Serialize;

use std::fmt;
use std::str::FromStr;

/// Decoded parameters of `GET /api/v1/flows`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFlowsParams {
    /// Keep the request open and stream new flows as they arrive.
    pub watch: bool,
    /// Inclusive lower bound of the flow start time (Unix seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_gte: Option<i64>,
    /// Exclusive upper bound of the flow start time (Unix seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_lt: Option<i64>,
    /// Sort keys, primary first. Later keys only break ties of earlier ones.
    pub sort_by: Vec<ListFlowsSortBy>,
    pub filters: Filters,
}

/// Closed set of keys a flow listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFlowsSortBy {
    Time,
    SourceName,
    SourceNamespace,
    DestName,
    DestNamespace,
    DestPort,
}

impl ListFlowsSortBy {
    /// Every variant, in declaration order.
    pub const ALL: [ListFlowsSortBy; 6] = [
        ListFlowsSortBy::Time,
        ListFlowsSortBy::SourceName,
        ListFlowsSortBy::SourceNamespace,
        ListFlowsSortBy::DestName,
        ListFlowsSortBy::DestNamespace,
        ListFlowsSortBy::DestPort,
    ];

    /// Canonical wire token, the only form accepted on input.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListFlowsSortBy::Time => "time",
            ListFlowsSortBy::SourceName => "sourcename",
            ListFlowsSortBy::SourceNamespace => "sourcenamespace",
            ListFlowsSortBy::DestName => "destname",
            ListFlowsSortBy::DestNamespace => "destnamespace",
            ListFlowsSortBy::DestPort => "destport",
        }
    }
}

impl fmt::Display for ListFlowsSortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListFlowsSortBy {
    type Err = String;

    /// Exact, case-sensitive match against the canonical token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("invalid sort key: '{s}'"))
    }
}

/// How a filter value is compared against flow data at query time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Full equality.
    #[default]
    Exact,
    /// Substring match.
    Fuzzy,
}

impl MatchType {
    pub const ALL: [MatchType; 2] = [MatchType::Exact, MatchType::Fuzzy];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(MatchType::Exact),
            "fuzzy" => Ok(MatchType::Fuzzy),
            other => Err(format!("invalid match type: '{other}'")),
        }
    }
}

/// Policy verdict recorded on a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Allow,
    Deny,
    Pass,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Allow, Action::Deny, Action::Pass];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Allow => "allow",
            Action::Deny => "deny",
            Action::Pass => "pass",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("invalid action: '{s}'"))
    }
}

/// A filter value paired with its comparison semantics.
///
/// `match_type` is always populated: decoders fill in [`MatchType::Exact`]
/// when the request leaves it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterMatch<T> {
    #[serde(rename = "V")]
    pub v: T,
    #[serde(rename = "Type")]
    pub match_type: MatchType,
}

impl<T> FilterMatch<T> {
    pub fn new(v: T, match_type: MatchType) -> Self {
        Self { v, match_type }
    }

    pub fn exact(v: T) -> Self {
        Self::new(v, MatchType::Exact)
    }

    pub fn fuzzy(v: T) -> Self {
        Self::new(v, MatchType::Fuzzy)
    }
}

impl<T: FromStr> FilterMatch<T> {
    /// Interpret a bare token as an exact match on its parsed value.
    pub fn from_token(token: &str) -> Result<Self, T::Err> {
        token.parse().map(Self::exact)
    }
}

/// Filter dimensions of a flow listing.
///
/// Entries of one dimension are OR-combined, dimensions are AND-combined.
/// An empty dimension does not filter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Filters {
    pub source_names: Vec<FilterMatch<String>>,
    pub source_namespaces: Vec<FilterMatch<String>>,
    pub dest_names: Vec<FilterMatch<String>>,
    pub dest_namespaces: Vec<FilterMatch<String>>,
    pub protocols: Vec<FilterMatch<String>>,
    pub dest_ports: Vec<FilterMatch<i64>>,
    pub actions: Vec<Action>,
}

impl Filters {
    /// True when no dimension filters anything.
    pub fn is_empty(&self) -> bool {
        self.source_names.is_empty()
            && self.source_namespaces.is_empty()
            && self.dest_names.is_empty()
            && self.dest_namespaces.is_empty()
            && self.protocols.is_empty()
            && self.dest_ports.is_empty()
            && self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_roundtrip() {
        for key in ListFlowsSortBy::ALL {
            let s = key.to_string();
            let parsed: ListFlowsSortBy = s.parse().unwrap();
            assert_eq!(key, parsed);
        }
    }

    #[test]
    fn test_sort_by_is_case_sensitive() {
        assert!("DestName".parse::<ListFlowsSortBy>().is_err());
        assert!(" destname".parse::<ListFlowsSortBy>().is_err());
        assert_eq!(
            "destname".parse::<ListFlowsSortBy>().unwrap(),
            ListFlowsSortBy::DestName
        );
    }

    #[test]
    fn test_match_type_default_is_exact() {
        assert_eq!(MatchType::default(), MatchType::Exact);
    }

    #[test]
    fn test_action_rejects_unknown() {
        let err = "drop".parse::<Action>().unwrap_err();
        assert_eq!(err, "invalid action: 'drop'");
    }

    #[test]
    fn test_filter_match_from_token() {
        let port = FilterMatch::<i64>::from_token("443").unwrap();
        assert_eq!(port, FilterMatch::exact(443));
        assert!(FilterMatch::<i64>::from_token("https").is_err());
    }

    #[test]
    fn test_filters_serialize_wire_names() {
        let filters = Filters {
            source_names: vec![FilterMatch::fuzzy("api".to_string())],
            ..Default::default()
        };
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["SourceNames"][0]["V"], "api");
        assert_eq!(json["SourceNames"][0]["Type"], "fuzzy");
        assert!(json["DestPorts"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_filters_is_empty() {
        assert!(Filters::default().is_empty());
        let filters = Filters {
            actions: vec![Action::Deny],
            ..Default::default()
        };
        assert!(!filters.is_empty());
    }
}
