//! Scatter aggregation: axis filtering and domain bounds.
//!
//! A scatter plot needs the raw points themselves; the only aggregation is
//! deciding which rows qualify (both axes present) and how far each axis
//! domain must stretch to cover them.

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use crate::row::{ColumnGetter, Row};
use crate::Result;

/// An axis value domain, serialized as a `[min, max]` pair. Both ends are
/// null until a value is observed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Domain {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Domain {
    /// Stretch the domain to cover a value.
    pub fn observe(&mut self, value: f64) {
        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&self.min)?;
        pair.serialize_element(&self.max)?;
        pair.end()
    }
}

/// A complete scatter dataset: the qualifying rows in their original order
/// and the axis domains covering exactly those rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterDataset {
    pub data: Vec<Row>,
    pub x_domain: Domain,
    pub y_domain: Domain,
}

/// Aggregate rows into a scatter dataset.
///
/// A row missing either axis value is excluded entirely: it contributes to
/// neither the output rows nor the domains, even if its other axis value
/// would have stretched a bound. Row order is preserved; with no qualifying
/// rows both domains stay `[null, null]`. A present but non-numeric axis
/// value fails with the typed error from the getter.
pub fn build_scatter_dataset(
    rows: Vec<Row>,
    x: &ColumnGetter,
    y: &ColumnGetter,
) -> Result<ScatterDataset> {
    let mut dataset = ScatterDataset::default();

    for (index, row) in rows.into_iter().enumerate() {
        let Some(x_value) = x.number(&row, index)? else {
            continue;
        };
        let Some(y_value) = y.number(&row, index)? else {
            continue;
        };
        dataset.x_domain.observe(x_value);
        dataset.y_domain.observe(y_value);
        dataset.data.push(row);
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnRef, TypeName};
    use crate::TabvizError;
    use serde_json::{json, Value};

    fn x_getter() -> ColumnGetter {
        ColumnGetter::new(&ColumnRef::new("movies", "budget", TypeName::Integer))
    }

    fn y_getter() -> ColumnGetter {
        ColumnGetter::new(&ColumnRef::new("movies", "rating", TypeName::Real))
    }

    fn point(x: Value, y: Value) -> Row {
        let mut row = Row::new();
        row.insert("movies.budget".to_string(), x);
        row.insert("movies.rating".to_string(), y);
        row
    }

    #[test]
    fn test_domains_cover_retained_rows() {
        let rows = vec![
            point(json!(10), json!(7.5)),
            point(json!(30), json!(2.0)),
            point(json!(20), json!(9.0)),
        ];
        let dataset = build_scatter_dataset(rows, &x_getter(), &y_getter()).unwrap();
        assert_eq!(dataset.data.len(), 3);
        assert_eq!(dataset.x_domain, Domain { min: Some(10.0), max: Some(30.0) });
        assert_eq!(dataset.y_domain, Domain { min: Some(2.0), max: Some(9.0) });
    }

    #[test]
    fn test_row_missing_one_axis_is_fully_excluded() {
        // The second row's x would stretch the domain, but its missing y
        // drops the row from rows and bounds alike.
        let rows = vec![
            point(json!(10), json!(7.5)),
            point(json!(500), Value::Null),
            point(json!(20), json!(2.0)),
        ];
        let dataset = build_scatter_dataset(rows, &x_getter(), &y_getter()).unwrap();
        assert_eq!(dataset.data.len(), 2);
        assert_eq!(dataset.x_domain.max, Some(20.0));
    }

    #[test]
    fn test_row_order_is_preserved() {
        let rows = vec![point(json!(3), json!(1.0)), point(json!(1), json!(2.0))];
        let dataset = build_scatter_dataset(rows, &x_getter(), &y_getter()).unwrap();
        let xs: Vec<&Value> = dataset.data.iter().map(|r| &r["movies.budget"]).collect();
        assert_eq!(xs, vec![&json!(3), &json!(1)]);
    }

    #[test]
    fn test_empty_input_yields_null_domains() {
        let dataset = build_scatter_dataset(Vec::new(), &x_getter(), &y_getter()).unwrap();
        assert!(dataset.data.is_empty());
        assert_eq!(dataset.x_domain, Domain::default());
        assert_eq!(dataset.y_domain, Domain::default());
    }

    #[test]
    fn test_non_numeric_axis_value_fails_typed() {
        let rows = vec![point(json!("millions"), json!(1.0))];
        let err = build_scatter_dataset(rows, &x_getter(), &y_getter()).unwrap_err();
        let TabvizError::NonNumeric { column, row } = err;
        assert_eq!(column, "movies.budget");
        assert_eq!(row, 0);
    }

    #[test]
    fn test_dataset_serializes_domains_as_pairs() {
        let rows = vec![point(json!(10), json!(7.5))];
        let dataset = build_scatter_dataset(rows, &x_getter(), &y_getter()).unwrap();
        let value = serde_json::to_value(&dataset).unwrap();
        assert_eq!(value["xDomain"], json!([10.0, 10.0]));
        assert_eq!(value["yDomain"], json!([7.5, 7.5]));
        assert_eq!(value["data"][0]["movies.rating"], json!(7.5));

        let empty = build_scatter_dataset(Vec::new(), &x_getter(), &y_getter()).unwrap();
        let value = serde_json::to_value(&empty).unwrap();
        assert_eq!(value["xDomain"], json!([null, null]));
    }
}
