//! URL query-string parsing into structured query state.
//!
//! All table-browsing state travels in the URL query string:
//!
//! ```text
//! filter=<column>,<operator>,<value>          (repeatable)
//! sort=<column>,<asc|desc>                    (repeatable, order-significant)
//! join=<table>,<from_col>:<to_col>[;…]        (at most one effective)
//! outerjoin=<table>,<from_col>:<to_col>[;…]   (mutually exclusive with join)
//! cols=<col1>,<col2>,…
//! x=<table.column>  y=<table.column>  color=<table.column>
//! page=<integer>  perPage=<integer>
//! ```
//!
//! [`parse_query`] never fails: recognized tokens are decoded, malformed or
//! unrecognized tokens are dropped and reported as [`ParseWarning`]s, and the
//! result is a fresh immutable [`QueryParams`] value. The reverse direction,
//! regenerating a canonical query string and the URLs that carry it, lives
//! in [`url`].

pub mod filter;
pub mod join;
pub mod sort;
pub mod url;

pub use filter::{Filter, FilterOp, FILTER_OPS};
pub use join::{ColumnPair, TableJoin};
pub use sort::{dedup_sorts, Sort, SortDirection};

use serde::{Deserialize, Serialize};

// ============================================================================
// Pagination
// ============================================================================

/// First page, 0-based. URLs carry 1-based page numbers.
pub const DEFAULT_PAGE: i64 = 0;

/// Rows per page when the URL does not say.
pub const DEFAULT_PER_PAGE: i64 = 50;

/// Page window for the row-query API. Carried alongside [`QueryParams`]
/// rather than inside it: pagination belongs to the fetching caller, not to
/// the query state that filters and charts share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 0-based page index.
    pub page: i64,
    /// Rows per page; `-1` (or below) means no limit.
    pub per_page: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Parse the raw `page`/`perPage` values from a URL.
    ///
    /// URL pages are 1-based and convert to the 0-based index; anything
    /// unparseable or negative falls back to the defaults.
    pub fn parse(page: Option<&str>, per_page: Option<&str>) -> Self {
        let mut page = page
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(|p| p - 1)
            .unwrap_or(DEFAULT_PAGE);
        if page < 0 {
            page = DEFAULT_PAGE;
        }
        let per_page = per_page
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_PER_PAGE);
        Self { page, per_page }
    }

    /// Row limit for a query, `None` when unlimited.
    pub fn limit(&self) -> Option<i64> {
        (self.per_page > -1).then_some(self.per_page)
    }

    /// Row offset for a query, `None` when unlimited.
    pub fn offset(&self) -> Option<i64> {
        self.limit().map(|per_page| self.page * per_page)
    }
}

// ============================================================================
// Query state
// ============================================================================

/// The structured, in-memory form of all table-browsing and chart state a
/// URL query string carries.
///
/// Values are created fresh from a URL and never mutated in place by the
/// codec; a caller updating state builds a new value and serializes it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryParams {
    /// Filters, kept grouped: all filters for a column sit adjacent, column
    /// groups in first-seen order. See [`QueryParams::add_filter`].
    pub filters: Vec<Filter>,
    /// Sorts in priority order, duplicates preserved.
    pub sorts: Vec<Sort>,
    /// The effective join, if any. Inner or outer per [`TableJoin::outer`].
    pub join: Option<TableJoin>,
    /// Explicit column selection; `None` selects every column.
    pub columns: Option<Vec<String>>,
    /// Chart x-axis binding, `table.column`.
    pub x: Option<String>,
    /// Chart y-axis binding, `table.column`.
    pub y: Option<String>,
    /// Chart color binding, `table.column`.
    pub color: Option<String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter to its column's group.
    ///
    /// The filter lands right after the last existing filter for the same
    /// column, or at the end for a column not seen before, keeping the list
    /// grouped without a separate map.
    pub fn add_filter(&mut self, filter: Filter) {
        match self
            .filters
            .iter()
            .rposition(|existing| existing.column == filter.column)
        {
            Some(index) => self.filters.insert(index + 1, filter),
            None => self.filters.push(filter),
        }
    }

    /// Filters applying to one column, in insertion order.
    pub fn filters_for<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Filter> {
        self.filters.iter().filter(move |f| f.column == column)
    }

    /// Distinct filtered columns in first-seen order.
    pub fn filter_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for filter in &self.filters {
            if !columns.contains(&filter.column.as_str()) {
                columns.push(&filter.column);
            }
        }
        columns
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// A non-fatal parse diagnostic: the offending token and why it was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub token: String,
    pub message: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: \"{}\"", self.message, self.token)
    }
}

/// Result of [`parse_query`]: the query state, the page window, and any
/// diagnostics collected along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    params: QueryParams,
    pagination: Pagination,
    warnings: Vec<ParseWarning>,
}

impl ParsedQuery {
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn into_params(self) -> QueryParams {
        self.params
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Diagnostics for dropped tokens, in input order.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }
}

/// Recognized query-string keys. Unknown keys fall through to the default
/// branch of the dispatch and become warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamKey {
    Filter,
    Sort,
    Join,
    OuterJoin,
    Cols,
    X,
    Y,
    Color,
    Page,
    PerPage,
}

impl ParamKey {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "filter" => Some(Self::Filter),
            "sort" => Some(Self::Sort),
            "join" => Some(Self::Join),
            "outerjoin" => Some(Self::OuterJoin),
            "cols" => Some(Self::Cols),
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "color" => Some(Self::Color),
            "page" => Some(Self::Page),
            "perPage" => Some(Self::PerPage),
            _ => None,
        }
    }
}

/// Parse a URL query string (with or without its leading `?`).
///
/// Tokens split on `&`; empty tokens are skipped. Every recognized key is
/// decoded by its own rule; malformed values and unrecognized keys are
/// dropped with a warning. Parsing itself never fails.
pub fn parse_query(query: &str) -> ParsedQuery {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut params = QueryParams::new();
    let mut warnings: Vec<ParseWarning> = Vec::new();
    let mut page_raw: Option<&str> = None;
    let mut per_page_raw: Option<&str> = None;

    let mut warn = |token: &str, message: String| {
        warnings.push(ParseWarning {
            token: token.to_string(),
            message,
        });
    };

    for token in query.split('&') {
        if token.is_empty() {
            continue;
        }
        let (key, value) = token.split_once('=').unwrap_or((token, ""));

        let Some(param) = ParamKey::parse(key) else {
            warn(token, format!("unrecognized query key \"{}\"", key));
            continue;
        };

        match param {
            ParamKey::Filter => match parse_filter_value(value) {
                Ok(filter) => params.add_filter(filter),
                Err(message) => warn(token, message),
            },
            ParamKey::Sort => match parse_sort_value(value) {
                Ok(sort) => params.sorts.push(sort),
                Err(message) => warn(token, message),
            },
            ParamKey::Join | ParamKey::OuterJoin => {
                // First valid occurrence of either key wins; later join
                // tokens of either kind are ignored.
                if params.join.is_some() {
                    continue;
                }
                let outer = param == ParamKey::OuterJoin;
                match TableJoin::parse(value, outer) {
                    Some(join) => params.join = Some(join),
                    None => warn(token, format!("invalid join \"{}\"", value)),
                }
            }
            ParamKey::Cols => params.columns = parse_col_names(value),
            ParamKey::X => params.x = non_empty(value),
            ParamKey::Y => params.y = non_empty(value),
            ParamKey::Color => params.color = non_empty(value),
            ParamKey::Page => page_raw = page_raw.or(Some(value)),
            ParamKey::PerPage => per_page_raw = per_page_raw.or(Some(value)),
        }
    }

    ParsedQuery {
        params,
        pagination: Pagination::parse(page_raw, per_page_raw),
        warnings,
    }
}

/// Decode `column,operator,value`; exactly three fields, each trimmed.
fn parse_filter_value(value: &str) -> Result<Filter, String> {
    let fields: Vec<&str> = value.split(',').map(str::trim).collect();
    let &[column, operator, filter_value] = fields.as_slice() else {
        return Err(format!(
            "expected \"column,operator,value\" in filter \"{}\"",
            value
        ));
    };
    let Some(operator) = FilterOp::parse(operator) else {
        return Err(format!("invalid filter operator \"{}\"", operator));
    };
    Ok(Filter::new(column, operator, filter_value))
}

/// Decode `column,direction`; the column must be non-blank and the direction
/// one of `asc`/`desc` in any case.
fn parse_sort_value(value: &str) -> Result<Sort, String> {
    let fields: Vec<&str> = value.split(',').map(str::trim).collect();
    let &[column, direction] = fields.as_slice() else {
        return Err(format!("expected \"column,direction\" in sort \"{}\"", value));
    };
    if column.is_empty() {
        return Err("sort column cannot be blank".to_string());
    }
    let Some(direction) = SortDirection::parse(direction) else {
        return Err(format!("invalid sort direction \"{}\"", direction));
    };
    Ok(Sort::new(column, direction))
}

/// Decode the `cols` list: trimmed, empties skipped, order-preserving dedup.
fn parse_col_names(value: &str) -> Option<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    for name in value.split(',') {
        let name = name.trim();
        if name.is_empty() || names.iter().any(|kept| kept == name) {
            continue;
        }
        names.push(name.to_string());
    }
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
