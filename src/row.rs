//! Typed access to wire-format rows.
//!
//! The row-query API returns rows as JSON objects keyed by the
//! `table.column` identity of each selected column. That shape is the wire
//! contract with the data-fetching layer, so it is preserved as-is; the rest
//! of the crate reads rows only through [`ColumnGetter`], which carries the
//! key derived from a [`ColumnRef`] so a misspelled key cannot silently read
//! as an absent value.

use serde_json::{Map, Value};

use crate::column::ColumnRef;
use crate::{Result, TabvizError};

/// One fetched row: `table.column` keys mapped to scalar JSON values.
pub type Row = Map<String, Value>;

/// Reads one column's value out of wire-format rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGetter {
    key: String,
}

impl ColumnGetter {
    pub fn new(column: &ColumnRef) -> Self {
        Self {
            key: column.full_name(),
        }
    }

    /// The `table.column` key this getter reads.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw value, treating JSON null and an absent key alike.
    pub fn get<'a>(&self, row: &'a Row) -> Option<&'a Value> {
        match row.get(&self.key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    /// The value as a number, `None` when null/absent.
    ///
    /// A value that is present but not numeric is malformed upstream data and
    /// fails with [`TabvizError::NonNumeric`] naming the column and the row's
    /// index in its batch.
    pub fn number(&self, row: &Row, row_index: usize) -> Result<Option<f64>> {
        match self.get(row) {
            None => Ok(None),
            Some(Value::Number(number)) => Ok(number.as_f64()),
            Some(_) => Err(TabvizError::NonNumeric {
                column: self.key.clone(),
                row: row_index,
            }),
        }
    }

    /// The value rendered as a group label. Strings are used verbatim,
    /// numbers and booleans via their display form, null/absent as `"null"`.
    pub fn label(&self, row: &Row) -> String {
        match self.get(row) {
            None => "null".to_string(),
            Some(Value::String(text)) => text.clone(),
            Some(Value::Bool(flag)) => flag.to_string(),
            Some(Value::Number(number)) => number.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

impl From<&ColumnRef> for ColumnGetter {
    fn from(column: &ColumnRef) -> Self {
        Self::new(column)
    }
}
