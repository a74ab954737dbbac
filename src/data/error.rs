use std::fmt;

// ---------------------------------------------------------------------------
// Data-layer error taxonomy
// ---------------------------------------------------------------------------

/// Errors raised by the data layer.
///
/// `Source` and `Schema` are fatal at startup: the dashboard cannot render
/// without its datasets. `EmptyDataset` is raised when a statistic is
/// requested on zero rows (mean of nothing is undefined) and must be handled
/// by the caller rather than coerced to 0. Empty filter results and missing
/// detail rows are *not* errors; they come back as empty tables / `None`.
#[derive(Debug)]
pub enum DataError {
    /// Source file missing, unreadable, unparsable, or containing no rows.
    Source { source: String, reason: String },

    /// A column the core depends on is absent from a loaded dataset.
    Schema { dataset: String, column: String },

    /// A statistic was requested on a dataset with no usable rows.
    EmptyDataset { dataset: String, statistic: String },
}

// Manual impls instead of `#[derive(thiserror::Error)]`: the `Source` variant
// has a `String` field named `source`, which thiserror would otherwise infer
// as the error's source and fail to compile.
impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Source { source, reason } => {
                write!(f, "data source '{source}': {reason}")
            }
            DataError::Schema { dataset, column } => {
                write!(f, "dataset '{dataset}' is missing required column '{column}'")
            }
            DataError::EmptyDataset { dataset, statistic } => {
                write!(f, "dataset '{dataset}' has no rows; {statistic} is undefined")
            }
        }
    }
}

impl std::error::Error for DataError {}

impl DataError {
    pub fn source(source: impl Into<String>, reason: impl Into<String>) -> Self {
        DataError::Source {
            source: source.into(),
            reason: reason.into(),
        }
    }
}
