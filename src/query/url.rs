//! Canonical query-string serialization and route construction.
//!
//! The reverse of [`parse_query`](super::parse_query): regenerate a query
//! string whose re-parse yields the same structural state, and compose the
//! page, row-query API, and chart routes that carry it. The string is
//! canonical: components always appear as `page`, `perPage`, join, `cols`,
//! filters (grouped by column), then sorts, so it need not match the byte
//! form the state was first parsed from.

use super::QueryParams;
use crate::column::ColumnRef;

/// Serialize query state to a `?`-prefixed query string, or `""` when there
/// is nothing to carry. Absent and empty components are omitted entirely.
///
/// Axis bindings (`x`/`y`/`color`) never serialize here; the chart route
/// injects its own `y` binding (see [`chart_url`]).
pub fn query_string(page: Option<i64>, per_page: Option<i64>, params: &QueryParams) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(page) = page {
        parts.push(format!("page={}", page));
    }
    if let Some(per_page) = per_page {
        parts.push(format!("perPage={}", per_page));
    }
    if let Some(join) = &params.join {
        parts.push(format!("{}={}", join.key(), join.query_param()));
    }
    if let Some(columns) = &params.columns {
        if !columns.is_empty() {
            parts.push(format!("cols={}", columns.join(",")));
        }
    }
    for column in params.filter_columns() {
        for filter in params.filters_for(column) {
            parts.push(format!("filter={}", filter.query_param()));
        }
    }
    for sort in &params.sorts {
        parts.push(format!("sort={}", sort.query_param()));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}

/// The table page route: `/db/tables/{table}{?query}`.
pub fn table_url(
    table: &str,
    page: Option<i64>,
    per_page: Option<i64>,
    params: &QueryParams,
) -> String {
    format!("/db/tables/{}{}", table, query_string(page, per_page, params))
}

/// The row-query API route: `/api/db/tables/{table}/query{?query}`.
pub fn table_query_url(
    table: &str,
    page: Option<i64>,
    per_page: Option<i64>,
    params: &QueryParams,
) -> String {
    format!(
        "/api/db/tables/{}/query{}",
        table,
        query_string(page, per_page, params)
    )
}

/// The chart page route: `/db/tables/{table}/chart{?query&y=table.column}`.
///
/// Pagination is dropped (charts draw from the whole filtered set) and the
/// chosen column, when given, is injected as the `y` binding.
pub fn chart_url(table: &str, column: Option<&ColumnRef>, params: &QueryParams) -> String {
    let mut query = query_string(None, None, params);

    if let Some(column) = column {
        if query.is_empty() {
            query.push('?');
        } else {
            query.push('&');
        }
        query.push_str(&format!("y={}", column.full_name()));
    }

    format!("/db/tables/{}/chart{}", table, query)
}
