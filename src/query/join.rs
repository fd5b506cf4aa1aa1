//! Join descriptions and their URL wire format.
//!
//! A join travels as `join=<table>,<from_col>:<to_col>[;<from_col>:<to_col>…]`
//! (or `outerjoin=` for the outer variant). At most one join is in effect per
//! query; holding it as a single value with an `outer` flag makes that
//! invariant structural.

use serde::{Deserialize, Serialize};

/// One equality condition of a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPair {
    /// Column on the table being queried.
    pub from_column: String,
    /// Column on the joined table.
    pub to_column: String,
}

/// A join against one other table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableJoin {
    /// Table being joined in.
    pub table: String,
    /// Conditions, all of which must hold.
    pub column_pairs: Vec<ColumnPair>,
    /// True for an outer join, false for an inner join.
    pub outer: bool,
}

impl TableJoin {
    /// Parse the `table,from:to[;from:to…]` grammar.
    ///
    /// Returns `None` for anything malformed: a missing pair list, a pair
    /// without exactly one `:`, or extra commas.
    pub fn parse(value: &str, outer: bool) -> Option<Self> {
        let fields: Vec<&str> = value.split(',').collect();
        let &[table, pair_list] = fields.as_slice() else {
            return None;
        };

        let mut column_pairs = Vec::new();
        for pair in pair_list.split(';') {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            let &[from_column, to_column] = parts.as_slice() else {
                return None;
            };
            if from_column.is_empty() || to_column.is_empty() {
                return None;
            }
            column_pairs.push(ColumnPair {
                from_column: from_column.to_string(),
                to_column: to_column.to_string(),
            });
        }

        Some(Self {
            table: table.to_string(),
            column_pairs,
            outer,
        })
    }

    /// The query-string key this join serializes under.
    pub fn key(&self) -> &'static str {
        if self.outer {
            "outerjoin"
        } else {
            "join"
        }
    }

    /// The `table,from:to[;from:to…]` form used in join tokens.
    pub fn query_param(&self) -> String {
        let pairs: Vec<String> = self
            .column_pairs
            .iter()
            .map(|pair| format!("{}:{}", pair.from_column, pair.to_column))
            .collect();
        format!("{},{}", self.table, pairs.join(";"))
    }
}

impl std::fmt::Display for TableJoin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.query_param())
    }
}
