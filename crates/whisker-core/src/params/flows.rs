//! Query layout and rules for `GET /api/v1/flows`.
//!
//! | key            | strategy        | field            |
//! |----------------|-----------------|------------------|
//! | `watch`        | scalar          | `watch`          |
//! | `startTimeGte` | scalar          | `start_time_gte` |
//! | `startTimeLt`  | scalar          | `start_time_lt`  |
//! | `sortBy`       | repeated scalar | `sort_by`        |
//! | `filters`      | sub-document    | `filters`        |

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;

use whisker_types::config::ParamLimits;
use whisker_types::error::DecodeError;
use whisker_types::flow::{Filters, FilterMatch, ListFlowsParams, ListFlowsSortBy, MatchType};

use super::{ParamDescriptor, QueryParams};
use crate::codec::decode_token;
use crate::codec::document::deserialize_object;
use crate::codec::matching::{normalize_matches, WireMatch};
use crate::validate::Violations;

const MAX_PORT: i64 = 65_535;

/// `filters` document as sent by clients. Must be a JSON object.
#[derive(Debug, Deserialize)]
struct WireFilters(#[serde(deserialize_with = "deserialize_object")] WireDimensions);

/// Every dimension is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct WireDimensions {
    source_names: Vec<WireMatch<String>>,
    source_namespaces: Vec<WireMatch<String>>,
    dest_names: Vec<WireMatch<String>>,
    dest_namespaces: Vec<WireMatch<String>>,
    protocols: Vec<WireMatch<String>>,
    dest_ports: Vec<WireMatch<i64>>,
    actions: Vec<String>,
}

impl WireDimensions {
    fn normalize(self) -> Result<Filters, DecodeError> {
        let actions = self
            .actions
            .iter()
            .enumerate()
            .map(|(index, token)| decode_token(&format!("filters.Actions[{index}]"), token))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Filters {
            source_names: normalize_matches("filters.SourceNames", self.source_names)?,
            source_namespaces: normalize_matches("filters.SourceNamespaces", self.source_namespaces)?,
            dest_names: normalize_matches("filters.DestNames", self.dest_names)?,
            dest_namespaces: normalize_matches("filters.DestNamespaces", self.dest_namespaces)?,
            protocols: normalize_matches("filters.Protocols", self.protocols)?,
            dest_ports: normalize_matches("filters.DestPorts", self.dest_ports)?,
            actions,
        })
    }
}

impl QueryParams for ListFlowsParams {
    const NAME: &'static str = "ListFlowsParams";

    fn descriptor() -> &'static ParamDescriptor<Self> {
        static DESCRIPTOR: OnceLock<ParamDescriptor<ListFlowsParams>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            ParamDescriptor::<ListFlowsParams>::new()
                .scalar("watch", |p, watch: bool| p.watch = watch)
                .scalar("startTimeGte", |p, ts: i64| p.start_time_gte = Some(ts))
                .scalar("startTimeLt", |p, ts: i64| p.start_time_lt = Some(ts))
                .repeated("sortBy", |p, keys: Vec<ListFlowsSortBy>| p.sort_by = keys)
                .document("filters", |p, WireFilters(wire): WireFilters| {
                    p.filters = wire.normalize()?;
                    Ok(())
                })
        })
    }

    fn validate(&self, limits: &ParamLimits, violations: &mut Violations) {
        let mut seen = HashSet::new();
        for key in &self.sort_by {
            violations.ensure(
                ListFlowsSortBy::ALL.contains(key),
                "sortBy",
                format!("unsupported sort key '{key}'"),
            );
            violations.ensure(
                seen.insert(*key),
                "sortBy",
                format!("duplicate sort key '{key}'"),
            );
        }
        violations.ensure(
            self.sort_by.len() <= limits.max_sort_keys,
            "sortBy",
            format!(
                "at most {} sort keys are allowed, got {}",
                limits.max_sort_keys,
                self.sort_by.len()
            ),
        );

        if let (Some(gte), Some(lt)) = (self.start_time_gte, self.start_time_lt) {
            violations.ensure(
                gte < lt,
                "startTimeLt",
                format!("must be greater than startTimeGte ({gte}), got {lt}"),
            );
        }
        // A watch streams flows as they arrive, so it cannot end in the past.
        violations.ensure(
            !(self.watch && self.start_time_lt.is_some()),
            "watch",
            "cannot be combined with startTimeLt",
        );

        validate_filters(&self.filters, limits, violations);
    }
}

fn validate_filters(filters: &Filters, limits: &ParamLimits, violations: &mut Violations) {
    let string_dimensions = [
        ("SourceNames", &filters.source_names),
        ("SourceNamespaces", &filters.source_namespaces),
        ("DestNames", &filters.dest_names),
        ("DestNamespaces", &filters.dest_namespaces),
        ("Protocols", &filters.protocols),
    ];
    for (name, entries) in string_dimensions {
        check_dimension_size(name, entries.len(), limits, violations);
        for (index, entry) in entries.iter().enumerate() {
            violations.ensure(
                !entry.v.trim().is_empty(),
                format!("filters.{name}[{index}]"),
                "value must not be blank",
            );
        }
    }

    check_dimension_size("DestPorts", filters.dest_ports.len(), limits, violations);
    for (index, entry) in filters.dest_ports.iter().enumerate() {
        check_port(&format!("filters.DestPorts[{index}]"), entry, violations);
    }

    check_dimension_size("Actions", filters.actions.len(), limits, violations);
}

fn check_dimension_size(name: &str, len: usize, limits: &ParamLimits, violations: &mut Violations) {
    violations.ensure(
        len <= limits.max_filter_values,
        format!("filters.{name}"),
        format!(
            "at most {} values are allowed, got {len}",
            limits.max_filter_values
        ),
    );
}

fn check_port(field: &str, entry: &FilterMatch<i64>, violations: &mut Violations) {
    violations.ensure(
        (1..=MAX_PORT).contains(&entry.v),
        field,
        format!("port must be between 1 and {MAX_PORT}, got {}", entry.v),
    );
    violations.ensure(
        entry.match_type == MatchType::Exact,
        field,
        "ports only support exact matching",
    );
}
