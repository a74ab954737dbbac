use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::error::DataError;

// ---------------------------------------------------------------------------
// Value – a single cell of a dataset
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Using `BTreeMap` / `BTreeSet` downstream so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "—"),
        }
    }
}

impl Value {
    /// Interpret the value as an `f64` for numeric measures.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Interpret the value as an `i64` (years, ranks).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Exact, case-sensitive match against a categorical string.
    pub fn matches_str(&self, s: &str) -> bool {
        matches!(self, Value::String(v) if v == s)
    }
}

// ---------------------------------------------------------------------------
// Row – one record of a dataset
// ---------------------------------------------------------------------------

/// A single record (one row of a source table): column name → value.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: BTreeMap<String, Value>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Build a row from (column, value) pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Row {
            values: pairs.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – one complete loaded dataset
// ---------------------------------------------------------------------------

/// An immutable in-memory table with pre-computed column indices.
#[derive(Debug, Clone)]
pub struct Table {
    /// Dataset name (used in error messages and the UI).
    pub name: String,
    /// Column names in header order.
    pub columns: Vec<String>,
    /// All records, in source order.
    pub rows: Vec<Row>,
    /// For each column the sorted set of distinct values (drives dropdowns).
    pub unique_values: BTreeMap<String, BTreeSet<Value>>,
}

impl Table {
    /// Build the per-column unique-value index from the rows.
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<Value>> = BTreeMap::new();
        for row in &rows {
            for (col, val) in &row.values {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        Table {
            name: name.into(),
            columns,
            rows,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// All values of one column in row order. Fails with a schema error if
    /// the column does not exist in this dataset.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>, DataError> {
        if !self.has_column(name) {
            return Err(DataError::Schema {
                dataset: self.name.clone(),
                column: name.to_string(),
            });
        }
        Ok(self
            .rows
            .iter()
            .map(|r| r.get(name).unwrap_or(&Value::Null))
            .collect())
    }

    /// Distinct values of a column, sorted; empty if the column is unknown.
    pub fn distinct(&self, name: &str) -> Vec<Value> {
        self.unique_values
            .get(name)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::DataError;

    fn sample_table() -> Table {
        let columns = vec!["Country".to_string(), "Year".to_string()];
        let rows = vec![
            Row::from_pairs([
                ("Country".to_string(), Value::String("Global".into())),
                ("Year".to_string(), Value::Integer(2023)),
            ]),
            Row::from_pairs([
                ("Country".to_string(), Value::String("India".into())),
                ("Year".to_string(), Value::Integer(2024)),
            ]),
        ];
        Table::new("demand", columns, rows)
    }

    #[test]
    fn column_returns_values_in_row_order() {
        let table = sample_table();
        let years = table.column("Year").unwrap();
        assert_eq!(years, vec![&Value::Integer(2023), &Value::Integer(2024)]);
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let table = sample_table();
        let err = table.column("Salary").unwrap_err();
        assert!(matches!(
            err,
            DataError::Schema { ref column, .. } if column == "Salary"
        ));
    }

    #[test]
    fn unique_values_are_indexed_per_column() {
        let table = sample_table();
        let countries = table.distinct("Country");
        assert_eq!(
            countries,
            vec![
                Value::String("Global".into()),
                Value::String("India".into())
            ]
        );
    }

    #[test]
    fn value_ordering_is_total_across_types() {
        assert!(Value::Null < Value::Integer(0));
        // Types order by kind first, then by value within the kind.
        assert!(Value::Integer(1) < Value::Float(0.5));
        assert!(Value::String("a".into()) < Value::String("b".into()));
    }
}
