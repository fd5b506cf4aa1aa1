//! Column filters and their URL wire format.
//!
//! A filter travels as `filter=<column>,<operator>,<value>`. For the
//! list-valued operators the value packs `;`-separated sub-values; the codec
//! carries that string opaquely and only the consumer splits it.

use serde::{Deserialize, Serialize};

/// Filter operators, in the order the filter UI presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    Lt,
    Lte,
    Eq,
    Neq,
    Gt,
    Gte,
    In,
    NotIn,
    #[serde(rename = "bt")]
    Between,
    #[serde(rename = "nbt")]
    NotBetween,
}

/// Every operator, in presentation order.
pub const FILTER_OPS: [FilterOp; 10] = [
    FilterOp::Lt,
    FilterOp::Lte,
    FilterOp::Eq,
    FilterOp::Neq,
    FilterOp::Gt,
    FilterOp::Gte,
    FilterOp::In,
    FilterOp::NotIn,
    FilterOp::Between,
    FilterOp::NotBetween,
];

impl FilterOp {
    /// The wire spelling used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Between => "bt",
            Self::NotBetween => "nbt",
        }
    }

    /// Parse a wire spelling.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "eq" => Some(Self::Eq),
            "neq" => Some(Self::Neq),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "in" => Some(Self::In),
            "not_in" => Some(Self::NotIn),
            "bt" => Some(Self::Between),
            "nbt" => Some(Self::NotBetween),
            _ => None,
        }
    }

    /// Human-readable label for filter pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Lt => "less than",
            Self::Lte => "less than or equal to",
            Self::Eq => "equal to",
            Self::Neq => "not equal to",
            Self::Gt => "greater than",
            Self::Gte => "greater than or equal to",
            Self::In => "in (example: a;b;c)",
            Self::NotIn => "not in (example: a;b;c)",
            Self::Between => "between (example: 65;95)",
            Self::NotBetween => "not between (example: 65;95)",
        }
    }

    /// Whether the operator's value is a `;`-separated list.
    pub fn is_list(self) -> bool {
        matches!(self, Self::In | Self::NotIn | Self::Between | Self::NotBetween)
    }
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One filter applied to a column. Several filters may target the same
/// column; they accumulate rather than replace each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Column name as written in the URL, usually qualified `table.name`.
    pub column: String,
    pub operator: FilterOp,
    /// Raw value string; see [`Filter::values`] for list operators.
    pub value: String,
}

impl Filter {
    pub fn new(
        column: impl Into<String>,
        operator: FilterOp,
        value: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    /// Owning table when the column is written qualified.
    pub fn table_name(&self) -> Option<&str> {
        self.column.split_once('.').map(|(table, _)| table)
    }

    /// Column name without its table qualifier.
    pub fn column_name(&self) -> &str {
        match self.column.split_once('.') {
            Some((_, name)) => name,
            None => &self.column,
        }
    }

    /// The value split for the consumer: `;`-separated sub-values for list
    /// operators, the single value otherwise.
    pub fn values(&self) -> Vec<&str> {
        if self.operator.is_list() {
            self.value.split(';').collect()
        } else {
            vec![self.value.as_str()]
        }
    }

    /// The `column,operator,value` form used in `filter=` tokens.
    pub fn query_param(&self) -> String {
        format!("{},{},{}", self.column, self.operator.as_str(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_spellings_round_trip() {
        for op in FILTER_OPS {
            assert_eq!(FilterOp::parse(op.as_str()), Some(op));
        }
        assert_eq!(FilterOp::parse("between"), None);
        assert_eq!(FilterOp::parse(""), None);
    }

    #[test]
    fn test_serde_uses_wire_spellings() {
        assert_eq!(serde_json::to_string(&FilterOp::NotIn).unwrap(), "\"not_in\"");
        assert_eq!(serde_json::to_string(&FilterOp::Between).unwrap(), "\"bt\"");
        let op: FilterOp = serde_json::from_str("\"nbt\"").unwrap();
        assert_eq!(op, FilterOp::NotBetween);
    }

    #[test]
    fn test_list_operators() {
        assert!(FilterOp::In.is_list());
        assert!(FilterOp::NotIn.is_list());
        assert!(FilterOp::Between.is_list());
        assert!(FilterOp::NotBetween.is_list());
        assert!(!FilterOp::Eq.is_list());
        assert!(!FilterOp::Gte.is_list());
    }

    #[test]
    fn test_every_operator_has_a_label() {
        for op in FILTER_OPS {
            assert!(!op.label().is_empty());
        }
        assert_eq!(FilterOp::Lt.label(), "less than");
        assert_eq!(FilterOp::Between.label(), "between (example: 65;95)");
    }

    #[test]
    fn test_values_splits_only_list_operators() {
        let filter = Filter::new("movies.rating", FilterOp::Between, "65;95");
        assert_eq!(filter.values(), vec!["65", "95"]);
        let filter = Filter::new("movies.title", FilterOp::Eq, "a;b");
        assert_eq!(filter.values(), vec!["a;b"]);
    }

    #[test]
    fn test_qualified_column_accessors() {
        let filter = Filter::new("movies.rating", FilterOp::Gt, "7");
        assert_eq!(filter.table_name(), Some("movies"));
        assert_eq!(filter.column_name(), "rating");
        let bare = Filter::new("rating", FilterOp::Gt, "7");
        assert_eq!(bare.table_name(), None);
        assert_eq!(bare.column_name(), "rating");
    }

    #[test]
    fn test_query_param_format() {
        let filter = Filter::new("movies.rating", FilterOp::Gte, "7.5");
        assert_eq!(filter.query_param(), "movies.rating,gte,7.5");
    }
}
