//! Column descriptors and type classification.
//!
//! Columns arrive as JSON from the table-metadata API: a name, the owning
//! table, a declared SQL type tag, and key/nullability metadata. The declared
//! type decides whether a column can feed a numeric axis or act as a discrete
//! grouping; everything the pipeline knows about a column derives from that
//! classification.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type tags and categories
// ============================================================================

/// Declared SQL type tags recognized by the classifier.
///
/// The tags match the type names reported by the metadata API. Any other tag
/// parses as [`TypeName::Unknown`] and classifies as
/// [`ColumnCategory::Other`], so deserialization and classification are total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum TypeName {
    #[serde(rename = "DOUBLE_PRECISION")]
    DoublePrecision,
    #[serde(rename = "FLOAT")]
    Float,
    #[serde(rename = "INTEGER")]
    Integer,
    #[serde(rename = "REAL")]
    Real,
    #[serde(rename = "NUMERIC")]
    Numeric,
    #[serde(rename = "SMALLINT")]
    SmallInt,
    #[serde(rename = "CHAR")]
    Char,
    #[serde(rename = "VARCHAR")]
    VarChar,
    #[serde(rename = "TEXT")]
    Text,
    #[serde(rename = "BOOLEAN")]
    Boolean,
    /// Any type tag outside the fixed tables.
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

/// Type tags that chart as continuous numeric values.
pub const NUMERIC_TYPES: [TypeName; 6] = [
    TypeName::DoublePrecision,
    TypeName::Float,
    TypeName::Integer,
    TypeName::Real,
    TypeName::Numeric,
    TypeName::SmallInt,
];

/// Type tags that chart as discrete groups.
pub const DISCRETE_TYPES: [TypeName; 4] = [
    TypeName::Char,
    TypeName::VarChar,
    TypeName::Text,
    TypeName::Boolean,
];

impl TypeName {
    /// Parse a wire spelling; anything unrecognized is [`TypeName::Unknown`].
    pub fn parse(text: &str) -> Self {
        match text {
            "DOUBLE_PRECISION" => Self::DoublePrecision,
            "FLOAT" => Self::Float,
            "INTEGER" => Self::Integer,
            "REAL" => Self::Real,
            "NUMERIC" => Self::Numeric,
            "SMALLINT" => Self::SmallInt,
            "CHAR" => Self::Char,
            "VARCHAR" => Self::VarChar,
            "TEXT" => Self::Text,
            "BOOLEAN" => Self::Boolean,
            _ => Self::Unknown,
        }
    }

    /// The wire spelling of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DoublePrecision => "DOUBLE_PRECISION",
            Self::Float => "FLOAT",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Numeric => "NUMERIC",
            Self::SmallInt => "SMALLINT",
            Self::Char => "CHAR",
            Self::VarChar => "VARCHAR",
            Self::Text => "TEXT",
            Self::Boolean => "BOOLEAN",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Classify the tag. The numeric and discrete tables are disjoint; every
    /// remaining tag is [`ColumnCategory::Other`].
    pub fn category(self) -> ColumnCategory {
        match self {
            Self::DoublePrecision
            | Self::Float
            | Self::Integer
            | Self::Real
            | Self::Numeric
            | Self::SmallInt => ColumnCategory::Numeric,
            Self::Char | Self::VarChar | Self::Text | Self::Boolean => ColumnCategory::Discrete,
            Self::Unknown => ColumnCategory::Other,
        }
    }
}

impl From<String> for TypeName {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a column's declared type means to the chart pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnCategory {
    Numeric,
    Discrete,
    Other,
}

// ============================================================================
// Column descriptors
// ============================================================================

/// A foreign-key reference attached to a column descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Referenced column name.
    pub name: String,
    /// Table owning the referenced column.
    pub table_name: String,
}

/// One column of a table, as described by the metadata API.
///
/// Identity is `table.name`; the composite key is assumed unique within a
/// table's column set. Descriptors are immutable once loaded, and the type
/// category is always derived via [`TypeName::category`], never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Owning table name.
    pub table: String,
    /// Column name, unqualified.
    pub name: String,
    /// Declared SQL type tag.
    #[serde(rename = "type")]
    pub type_name: TypeName,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

impl ColumnRef {
    /// A descriptor with no key/nullability metadata.
    pub fn new(table: impl Into<String>, name: impl Into<String>, type_name: TypeName) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            type_name,
            primary_key: false,
            nullable: false,
            foreign_keys: Vec::new(),
        }
    }

    /// The `table.name` identity, as used in row keys and URL bindings.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.table, self.name)
    }
}

// ============================================================================
// Classification and lookup
// ============================================================================

/// Category of an optional column binding. An unbound column is
/// [`ColumnCategory::Other`]; this never fails.
pub fn category(column: Option<&ColumnRef>) -> ColumnCategory {
    match column {
        Some(column) => column.type_name.category(),
        None => ColumnCategory::Other,
    }
}

/// Whether a bound column charts as numeric. False when unbound.
pub fn is_numeric(column: Option<&ColumnRef>) -> bool {
    category(column) == ColumnCategory::Numeric
}

/// Whether a bound column charts as discrete. False when unbound.
pub fn is_discrete(column: Option<&ColumnRef>) -> bool {
    category(column) == ColumnCategory::Discrete
}

/// Find a column by its `table.name` identity. Empty names match nothing.
pub fn find_column<'a>(columns: &'a [ColumnRef], full_name: &str) -> Option<&'a ColumnRef> {
    if full_name.is_empty() {
        return None;
    }
    columns.iter().find(|column| column.full_name() == full_name)
}

/// Resolve a possibly-qualified column name.
///
/// A qualified `table.name` must match both parts. An unqualified name falls
/// back to the first column carrying it, so qualified entries always take
/// precedence over the bare-name fallback.
pub fn resolve_column<'a>(columns: &'a [ColumnRef], name: &str) -> Option<&'a ColumnRef> {
    if name.is_empty() {
        return None;
    }
    match name.split_once('.') {
        Some((table, column_name)) => columns
            .iter()
            .find(|column| column.table == table && column.name == column_name),
        None => columns.iter().find(|column| column.name == name),
    }
}
