/*!
# tabviz - table browsing core

The framework-agnostic core of a database-table browsing UI: every piece of
browsing state (filters, sorts, joins, column selection, chart bindings,
pagination) lives in the URL query string, and numeric columns can be
visualized as box plots or scatter plots.

## Example

```rust
use tabviz::chart::{ChartModel, ChartType};
use tabviz::column::{ColumnRef, TypeName};
use tabviz::query::{parse_query, url};

let parsed = parse_query(
    "filter=movies.rating,gt,2&sort=movies.rating,desc&x=movies.genre&y=movies.rating",
);

let columns = vec![
    ColumnRef::new("movies", "genre", TypeName::Text),
    ColumnRef::new("movies", "rating", TypeName::Real),
];
let model = ChartModel::new("movies", &columns, parsed.params());
assert_eq!(model.chart_type(), ChartType::Box);

let api_url = url::table_query_url("movies", Some(1), Some(50), parsed.params());
assert_eq!(
    api_url,
    "/api/db/tables/movies/query?page=1&perPage=50\
     &filter=movies.rating,gt,2&sort=movies.rating,desc",
);
```

## Architecture

State flows one way: a raw URL parses into [`query::QueryParams`], column
bindings resolve against the table's [`column::ColumnRef`] set, the resolved
bindings pick a [`chart::ChartType`], and the aggregation turns fetched rows
into chart-ready data. The codec runs in reverse whenever the UI needs a URL
reflecting updated state.

## Core Components

- [`query`] - query-string parsing, canonical serialization, URL building
- [`column`] - column descriptors and numeric/discrete classification
- [`chart`] - chart-type resolution and box-plot/scatter aggregation
- [`row`] - typed access to the wire-format rows

Fetching rows, rendering, and the component tree around all of this are the
host application's business; everything here is synchronous and pure.
*/

pub mod chart;
pub mod column;
pub mod query;
pub mod row;

// Re-export key types for convenience
pub use chart::{
    resolve_chart_type, BoxPlotDataset, BoxPlotStats, ChartData, ChartModel, ChartType,
    ScatterDataset,
};
pub use column::{category, ColumnCategory, ColumnRef, TypeName};
pub use query::{
    parse_query, Filter, FilterOp, Pagination, ParsedQuery, QueryParams, Sort, SortDirection,
    TableJoin,
};
pub use row::{ColumnGetter, Row};

/// Main library error type.
///
/// Query parsing and chart-type resolution degrade instead of failing; the
/// only hard failure is malformed upstream data hitting an aggregation.
#[derive(thiserror::Error, Debug)]
pub enum TabvizError {
    /// A numeric aggregation met a value that is not a number. Carries the
    /// `table.column` key and the row's index in its batch.
    #[error("non-numeric value in column \"{column}\" at row {row}")]
    NonNumeric { column: String, row: usize },
}

pub type Result<T> = std::result::Result<T, TabvizError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
