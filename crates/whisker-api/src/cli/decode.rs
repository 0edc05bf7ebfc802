//! `whisker decode` and `whisker sort-keys`.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use serde_json::json;

use whisker_api::http::error::params_error_details;
use whisker_core::codec::QueryToken;
use whisker_core::params::{decode_and_validate, QueryValues};
use whisker_types::config::ParamLimits;
use whisker_types::error::ParamsError;
use whisker_types::flow::{FilterMatch, Filters, ListFlowsParams, ListFlowsSortBy};

/// Decode `query` as flow-listing parameters and print the outcome.
///
/// Returns whether the query was accepted.
pub fn decode_query(query: &str, limits: &ParamLimits, json: bool) -> Result<bool> {
    let values = QueryValues::parse(query);

    match decode_and_validate::<ListFlowsParams>(&values, limits) {
        Ok(params) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&params)?);
            } else {
                print_params(&params);
            }
            Ok(true)
        }
        Err(err) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&error_json(&err))?);
            } else {
                print_error(&err);
            }
            Ok(false)
        }
    }
}

/// Print the accepted sort tokens.
pub fn list_sort_keys(json: bool) -> Result<()> {
    let tokens = ListFlowsSortBy::allowed_tokens();
    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for token in tokens {
            println!("{token}");
        }
    }
    Ok(())
}

fn error_json(err: &ParamsError) -> serde_json::Value {
    json!({
        "code": err.kind().code(),
        "message": err.to_string(),
        "errors": params_error_details(err),
    })
}

fn print_params(params: &ListFlowsParams) {
    println!();
    println!("  {} Query accepted", style("✓").green().bold());
    println!();

    let sort = if params.sort_by.is_empty() {
        "(default)".to_string()
    } else {
        params
            .sort_by
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("  {:<12} {}", style("Sort by").dim(), sort);
    println!(
        "  {:<12} {}",
        style("Window").dim(),
        format_window(params.start_time_gte, params.start_time_lt)
    );
    println!("  {:<12} {}", style("Watch").dim(), params.watch);

    let rows = filter_rows(&params.filters);
    if rows.is_empty() {
        println!("  {:<12} none", style("Filters").dim());
        println!();
        return;
    }

    println!();
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Dimension").fg(Color::White),
        Cell::new("Value").fg(Color::White),
        Cell::new("Match").fg(Color::White),
    ]);
    for [dimension, value, match_type] in rows {
        table.add_row(vec![Cell::new(dimension), Cell::new(value), Cell::new(match_type)]);
    }
    println!("{table}");
    println!();
}

fn print_error(err: &ParamsError) {
    println!();
    println!(
        "  {} Query rejected ({})",
        style("✗").red().bold(),
        style(err.kind().code()).yellow()
    );
    for detail in params_error_details(err) {
        println!("    - {}", detail.message);
    }
    println!();
}

fn format_window(gte: Option<i64>, lt: Option<i64>) -> String {
    match (gte, lt) {
        (None, None) => "unbounded".to_string(),
        (Some(gte), None) => format!("[{gte}, ...)"),
        (None, Some(lt)) => format!("(..., {lt})"),
        (Some(gte), Some(lt)) => format!("[{gte}, {lt})"),
    }
}

/// One `[dimension, value, match]` row per filter entry.
fn filter_rows(filters: &Filters) -> Vec<[String; 3]> {
    fn push_matches<T: ToString>(rows: &mut Vec<[String; 3]>, name: &str, entries: &[FilterMatch<T>]) {
        for entry in entries {
            rows.push([
                name.to_string(),
                entry.v.to_string(),
                entry.match_type.to_string(),
            ]);
        }
    }

    let mut rows = Vec::new();
    push_matches(&mut rows, "SourceNames", &filters.source_names);
    push_matches(&mut rows, "SourceNamespaces", &filters.source_namespaces);
    push_matches(&mut rows, "DestNames", &filters.dest_names);
    push_matches(&mut rows, "DestNamespaces", &filters.dest_namespaces);
    push_matches(&mut rows, "Protocols", &filters.protocols);
    push_matches(&mut rows, "DestPorts", &filters.dest_ports);
    for action in &filters.actions {
        rows.push(["Actions".to_string(), action.to_string(), "exact".to_string()]);
    }
    rows
}
