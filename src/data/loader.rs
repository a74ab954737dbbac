use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{Row, Table, Value};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with column names, one record per line
/// * `.json` – records-oriented array: `[{ "Country": "Global", ... }, ...]`
///
/// `name` is the logical dataset name used in error messages; the resulting
/// table may still be empty — callers that require rows check that themselves.
pub fn load_file(name: &str, path: &Path) -> Result<Table, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(name, path),
        "json" => load_json(name, path),
        other => Err(DataError::source(
            name,
            format!("unsupported file extension: .{other}"),
        )),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(name: &str, path: &Path) -> Result<Table, DataError> {
    let file = std::fs::File::open(path)
        .map_err(|e| DataError::source(name, format!("opening {}: {e}", path.display())))?;
    read_csv(name, file)
}

/// Parse CSV from any reader. Split out from [`load_csv`] so tests can feed
/// in-memory bytes instead of touching the filesystem.
pub fn read_csv<R: Read>(name: &str, reader: R) -> Result<Table, DataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()
        .map_err(|e| DataError::source(name, format!("reading CSV header: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in csv_reader.records().enumerate() {
        let record =
            result.map_err(|e| DataError::source(name, format!("CSV row {row_no}: {e}")))?;

        let mut row = Row {
            values: BTreeMap::new(),
        };
        for (col_idx, raw) in record.iter().enumerate() {
            let Some(col_name) = columns.get(col_idx) else {
                return Err(DataError::source(
                    name,
                    format!("CSV row {row_no} has more fields than the header"),
                ));
            };
            row.values.insert(col_name.clone(), guess_cell_type(raw));
        }
        rows.push(row);
    }

    Ok(Table::new(name, columns, rows))
}

/// Infer a cell's type from its text: integer → float → bool → string,
/// empty → Null.
fn guess_cell_type(s: &str) -> Value {
    let s = s.trim();
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    if s == "true" || s == "false" {
        return Value::Bool(s == "true");
    }
    Value::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Country": "Global", "Year": 2023, "Total_Job_postings": 125000 },
///   ...
/// ]
/// ```
fn load_json(name: &str, path: &Path) -> Result<Table, DataError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| DataError::source(name, format!("reading {}: {e}", path.display())))?;
    let root: JsonValue = serde_json::from_str(&text)
        .map_err(|e| DataError::source(name, format!("parsing JSON: {e}")))?;

    let records = root
        .as_array()
        .ok_or_else(|| DataError::source(name, "expected a top-level JSON array"))?;

    // Column order follows first appearance across records.
    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataError::source(name, format!("row {i} is not a JSON object")))?;

        let mut row = Row {
            values: BTreeMap::new(),
        };
        for (key, val) in obj {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
            row.values.insert(key.clone(), json_to_value(val));
        }
        rows.push(row);
    }

    Ok(Table::new(name, columns, rows))
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_header_defines_columns_and_cells_are_typed() {
        let csv = "Country,Year,Total_Job_postings\nGlobal,2023,125000\nGlobal,2024,150000\n";
        let table = read_csv("demand", csv.as_bytes()).unwrap();

        assert_eq!(table.columns, vec!["Country", "Year", "Total_Job_postings"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rows[0].get("Country"),
            Some(&Value::String("Global".into()))
        );
        assert_eq!(table.rows[0].get("Year"), Some(&Value::Integer(2023)));
    }

    #[test]
    fn cell_type_guessing() {
        assert_eq!(guess_cell_type("42"), Value::Integer(42));
        assert_eq!(guess_cell_type("3.5"), Value::Float(3.5));
        assert_eq!(guess_cell_type("true"), Value::Bool(true));
        assert_eq!(guess_cell_type(""), Value::Null);
        assert_eq!(
            guess_cell_type("United States"),
            Value::String("United States".into())
        );
    }

    #[test]
    fn csv_with_only_a_header_yields_an_empty_table() {
        let table = read_csv("skills", "Ranking,Skill\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns, vec!["Ranking", "Skill"]);
    }

    #[test]
    fn malformed_csv_is_a_source_error() {
        // A record with more fields than the header fails the read.
        let csv = "Ranking,Skill\n1,Machine Learning,extra\n";
        let err = read_csv("skills", csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Source { .. }));
    }
}
