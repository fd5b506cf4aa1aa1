//! Chart-type resolution and the chart data pipeline.
//!
//! Given the classified x/y column bindings, [`resolve_chart_type`] decides
//! which chart applies; [`ChartModel`] ties that decision to a table's
//! columns and runs the matching aggregation over fetched rows. Nothing here
//! renders; the output is the data a renderer consumes.

pub mod boxplot;
pub mod scatter;

pub use boxplot::{build_box_plot_dataset, BoxPlotDataset, BoxPlotStats, Quartiles, Whiskers};
pub use scatter::{build_scatter_dataset, Domain, ScatterDataset};

use serde::{Deserialize, Serialize};

use crate::column::{self, find_column, ColumnRef};
use crate::query::QueryParams;
use crate::row::{ColumnGetter, Row};
use crate::Result;

/// Chart kinds the pipeline can produce. `None` means "nothing to draw",
/// a valid, renderable placeholder state rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChartType {
    Scatter,
    Box,
    None,
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Scatter => "SCATTER",
            Self::Box => "BOX",
            Self::None => "NONE",
        };
        write!(f, "{}", text)
    }
}

/// Decide the chart type from the bound columns.
///
/// Checked top to bottom, first match wins:
/// numeric x over numeric y is a scatter; discrete x over numeric y is a
/// box plot per group; a numeric y alone is a single box plot. Everything
/// else resolves to [`ChartType::None`], including a numeric x over a
/// discrete or absent y, which could only be a horizontal box plot.
pub fn resolve_chart_type(x: Option<&ColumnRef>, y: Option<&ColumnRef>) -> ChartType {
    let x_numeric = column::is_numeric(x);
    let y_numeric = column::is_numeric(y);
    let x_discrete = column::is_discrete(x);

    if x.is_some() && y.is_some() && x_numeric && y_numeric {
        ChartType::Scatter
    } else if x.is_some() && y.is_some() && x_discrete && y_numeric {
        ChartType::Box
    } else if x.is_none() && y.is_some() && y_numeric {
        ChartType::Box
    } else {
        ChartType::None
    }
}

/// Chart-ready data, tagged for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum ChartData {
    Box(BoxPlotDataset),
    Scatter(ScatterDataset),
    None,
}

/// The chart state for one table: axis and color bindings resolved against
/// the table's column set, and the data pipeline built from them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    table: String,
    x: Option<ColumnRef>,
    y: Option<ColumnRef>,
    color: Option<ColumnRef>,
}

impl ChartModel {
    /// Resolve the `x`/`y`/`color` bindings of `params` against `columns`.
    ///
    /// A binding naming no known column is left unbound; the chart type then
    /// degrades (usually to [`ChartType::None`]) instead of failing.
    pub fn new(table: impl Into<String>, columns: &[ColumnRef], params: &QueryParams) -> Self {
        let lookup = |binding: &Option<String>| {
            binding
                .as_deref()
                .and_then(|name| find_column(columns, name))
                .cloned()
        };
        Self {
            table: table.into(),
            x: lookup(&params.x),
            y: lookup(&params.y),
            color: lookup(&params.color),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn x(&self) -> Option<&ColumnRef> {
        self.x.as_ref()
    }

    pub fn y(&self) -> Option<&ColumnRef> {
        self.y.as_ref()
    }

    pub fn color(&self) -> Option<&ColumnRef> {
        self.color.as_ref()
    }

    pub fn chart_type(&self) -> ChartType {
        resolve_chart_type(self.x.as_ref(), self.y.as_ref())
    }

    /// Run the pipeline for the resolved chart type.
    ///
    /// Box plots group by the x binding when present and fall back to one
    /// bucket named after the table; scatter plots keep the rows themselves.
    pub fn data(&self, rows: Vec<Row>) -> Result<ChartData> {
        match self.chart_type() {
            ChartType::Box => {
                let Some(y) = &self.y else {
                    return Ok(ChartData::None);
                };
                let group = self.x.as_ref().map(ColumnGetter::new);
                let dataset = build_box_plot_dataset(
                    &rows,
                    &self.table,
                    group.as_ref(),
                    &ColumnGetter::new(y),
                )?;
                Ok(ChartData::Box(dataset))
            }
            ChartType::Scatter => {
                let (Some(x), Some(y)) = (&self.x, &self.y) else {
                    return Ok(ChartData::None);
                };
                let dataset =
                    build_scatter_dataset(rows, &ColumnGetter::new(x), &ColumnGetter::new(y))?;
                Ok(ChartData::Scatter(dataset))
            }
            ChartType::None => Ok(ChartData::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::TypeName;
    use crate::query::parse_query;
    use serde_json::json;

    fn numeric() -> ColumnRef {
        ColumnRef::new("movies", "rating", TypeName::Real)
    }

    fn discrete() -> ColumnRef {
        ColumnRef::new("movies", "genre", TypeName::Text)
    }

    fn other() -> ColumnRef {
        ColumnRef::new("movies", "released", TypeName::Unknown)
    }

    // ==================== Decision table ====================

    #[test]
    fn test_numeric_x_numeric_y_is_scatter() {
        assert_eq!(
            resolve_chart_type(Some(&numeric()), Some(&numeric())),
            ChartType::Scatter
        );
    }

    #[test]
    fn test_discrete_x_numeric_y_is_box() {
        assert_eq!(
            resolve_chart_type(Some(&discrete()), Some(&numeric())),
            ChartType::Box
        );
    }

    #[test]
    fn test_numeric_y_alone_is_box() {
        assert_eq!(resolve_chart_type(None, Some(&numeric())), ChartType::Box);
    }

    #[test]
    fn test_numeric_x_without_numeric_y_is_none() {
        assert_eq!(resolve_chart_type(Some(&numeric()), None), ChartType::None);
        assert_eq!(
            resolve_chart_type(Some(&numeric()), Some(&discrete())),
            ChartType::None
        );
    }

    #[test]
    fn test_remaining_combinations_are_none() {
        assert_eq!(resolve_chart_type(None, None), ChartType::None);
        assert_eq!(resolve_chart_type(Some(&discrete()), None), ChartType::None);
        assert_eq!(
            resolve_chart_type(Some(&discrete()), Some(&discrete())),
            ChartType::None
        );
        assert_eq!(resolve_chart_type(None, Some(&discrete())), ChartType::None);
        assert_eq!(
            resolve_chart_type(Some(&other()), Some(&numeric())),
            ChartType::None
        );
        assert_eq!(resolve_chart_type(None, Some(&other())), ChartType::None);
    }

    // ==================== Model binding ====================

    fn movie_columns() -> Vec<ColumnRef> {
        vec![
            ColumnRef::new("movies", "title", TypeName::VarChar),
            ColumnRef::new("movies", "genre", TypeName::Text),
            ColumnRef::new("movies", "rating", TypeName::Real),
            ColumnRef::new("movies", "budget", TypeName::Integer),
        ]
    }

    #[test]
    fn test_model_resolves_bindings_against_columns() {
        let parsed = parse_query("x=movies.genre&y=movies.rating&color=movies.title");
        let model = ChartModel::new("movies", &movie_columns(), parsed.params());
        assert_eq!(model.x().unwrap().name, "genre");
        assert_eq!(model.y().unwrap().name, "rating");
        assert_eq!(model.color().unwrap().name, "title");
        assert_eq!(model.chart_type(), ChartType::Box);
    }

    #[test]
    fn test_unknown_binding_degrades_to_none() {
        let parsed = parse_query("x=movies.budget&y=movies.missing");
        let model = ChartModel::new("movies", &movie_columns(), parsed.params());
        assert!(model.y().is_none());
        assert_eq!(model.chart_type(), ChartType::None);
        assert_eq!(model.data(Vec::new()).unwrap(), ChartData::None);
    }

    #[test]
    fn test_model_runs_grouped_box_pipeline() {
        let parsed = parse_query("x=movies.genre&y=movies.rating");
        let model = ChartModel::new("movies", &movie_columns(), parsed.params());

        let mut row = Row::new();
        row.insert("movies.genre".to_string(), json!("drama"));
        row.insert("movies.rating".to_string(), json!(7.0));
        let data = model.data(vec![row]).unwrap();

        match data {
            ChartData::Box(dataset) => {
                assert_eq!(dataset.rows.len(), 1);
                assert_eq!(dataset.rows[0].name, "drama");
            }
            other => panic!("expected box data, got {:?}", other),
        }
    }

    #[test]
    fn test_model_without_x_uses_table_bucket() {
        let parsed = parse_query("y=movies.rating");
        let model = ChartModel::new("movies", &movie_columns(), parsed.params());

        let mut row = Row::new();
        row.insert("movies.rating".to_string(), json!(7.0));
        let data = model.data(vec![row]).unwrap();

        match data {
            ChartData::Box(dataset) => assert_eq!(dataset.rows[0].name, "movies"),
            other => panic!("expected box data, got {:?}", other),
        }
    }

    #[test]
    fn test_model_runs_scatter_pipeline() {
        let parsed = parse_query("x=movies.budget&y=movies.rating");
        let model = ChartModel::new("movies", &movie_columns(), parsed.params());
        assert_eq!(model.chart_type(), ChartType::Scatter);

        let mut row = Row::new();
        row.insert("movies.budget".to_string(), json!(10));
        row.insert("movies.rating".to_string(), json!(7.0));
        let data = model.data(vec![row]).unwrap();

        match data {
            ChartData::Scatter(dataset) => {
                assert_eq!(dataset.data.len(), 1);
                assert_eq!(dataset.x_domain.min, Some(10.0));
            }
            other => panic!("expected scatter data, got {:?}", other),
        }
    }

    // ==================== Wire shape ====================

    #[test]
    fn test_chart_type_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&ChartType::Scatter).unwrap(), "\"SCATTER\"");
        assert_eq!(serde_json::to_string(&ChartType::None).unwrap(), "\"NONE\"");
        let parsed: ChartType = serde_json::from_str("\"BOX\"").unwrap();
        assert_eq!(parsed, ChartType::Box);
    }

    #[test]
    fn test_chart_data_is_tagged() {
        let value = serde_json::to_value(ChartData::None).unwrap();
        assert_eq!(value, json!({"type": "NONE"}));
    }
}
