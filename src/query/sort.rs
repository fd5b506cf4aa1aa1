//! Column sorts and their URL wire format.
//!
//! A sort travels as `sort=<column>,<asc|desc>`. The order of the sort list
//! is significant (primary sort first) and the codec preserves it exactly,
//! duplicates included; [`dedup_sorts`] is the one-sort-per-column view the
//! row-query caller applies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse a direction, case-insensitively.
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the ordered sort list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Column name as written in the URL, usually qualified `table.name`.
    pub column: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
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

    /// The `column,direction` form used in `sort=` tokens.
    pub fn query_param(&self) -> String {
        format!("{},{}", self.column, self.direction.as_str())
    }
}

/// Collapse repeated sorts to one per column.
///
/// Only one sort per column makes sense when querying, so the last sort for a
/// column wins, but it keeps the position where the column first appeared.
/// Columns are keyed by their unqualified name.
pub fn dedup_sorts(sorts: &[Sort]) -> Vec<Sort> {
    let mut deduped: Vec<Sort> = Vec::new();
    for sort in sorts {
        match deduped
            .iter_mut()
            .find(|kept| kept.column_name() == sort.column_name())
        {
            Some(kept) => *kept = sort.clone(),
            None => deduped.push(sort.clone()),
        }
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parses_case_insensitively() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("Asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("ascending"), None);
        assert_eq!(SortDirection::parse(""), None);
    }

    #[test]
    fn test_query_param_format() {
        let sort = Sort::new("movies.rating", SortDirection::Desc);
        assert_eq!(sort.query_param(), "movies.rating,desc");
    }

    #[test]
    fn test_dedup_last_wins_at_first_position() {
        let sorts = vec![
            Sort::new("movies.rating", SortDirection::Asc),
            Sort::new("movies.title", SortDirection::Asc),
            Sort::new("movies.rating", SortDirection::Desc),
        ];
        let deduped = dedup_sorts(&sorts);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].column, "movies.rating");
        assert_eq!(deduped[0].direction, SortDirection::Desc);
        assert_eq!(deduped[1].column, "movies.title");
    }

    #[test]
    fn test_dedup_keys_on_unqualified_name() {
        let sorts = vec![
            Sort::new("movies.rating", SortDirection::Asc),
            Sort::new("rating", SortDirection::Desc),
        ];
        let deduped = dedup_sorts(&sorts);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].column, "rating");
        assert_eq!(deduped[0].direction, SortDirection::Desc);
    }
}
