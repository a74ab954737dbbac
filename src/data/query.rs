use std::collections::BTreeMap;

use super::model::{Row, Table, Value};

// ---------------------------------------------------------------------------
// Selector: which value is chosen per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state: maps dimension name → the chosen value.
/// An empty selector means "no constraint" (every row passes). Selectors are
/// built fresh from the dropdown widgets on every interaction.
pub type Selector = BTreeMap<String, Value>;

/// Build a selector from (dimension, value) pairs, skipping unset dimensions.
pub fn selector_from<I>(pairs: I) -> Selector
where
    I: IntoIterator<Item = (&'static str, Option<Value>)>,
{
    pairs
        .into_iter()
        .filter_map(|(dim, val)| val.map(|v| (dim.to_string(), v)))
        .collect()
}

// ---------------------------------------------------------------------------
// Filter-query operations
// ---------------------------------------------------------------------------

/// Rows where *every* selector key matches exactly (case-sensitive, no
/// partial matching). A selector value that occurs nowhere in the table
/// yields an empty table, never an error. Filtering twice with the same
/// selector returns the same rows (idempotent).
pub fn filter_by_keys(table: &Table, selector: &Selector) -> Table {
    let rows: Vec<Row> = table
        .rows
        .iter()
        .filter(|row| {
            selector
                .iter()
                .all(|(dim, wanted)| row.get(dim) == Some(wanted))
        })
        .cloned()
        .collect();
    Table::new(table.name.clone(), table.columns.clone(), rows)
}

/// Partition rows by distinct `group_key` value and average `measure_key`
/// within each partition. Rows whose measure is missing or non-numeric are
/// skipped; a group with no numeric measures is dropped.
///
/// Output order is the first-seen order of the group values — chart axis
/// order is part of the displayed contract, so this never resorts.
pub fn group_and_average(table: &Table, group_key: &str, measure_key: &str) -> Vec<(Value, f64)> {
    grouped_measures(table, group_key, measure_key)
        .into_iter()
        .map(|(group, measures)| {
            let mean = measures.iter().sum::<f64>() / measures.len() as f64;
            (group, mean)
        })
        .collect()
}

/// Like [`group_and_average`] but summing the measure per partition.
pub fn group_and_sum(table: &Table, group_key: &str, measure_key: &str) -> Vec<(Value, f64)> {
    grouped_measures(table, group_key, measure_key)
        .into_iter()
        .map(|(group, measures)| (group, measures.iter().sum()))
        .collect()
}

/// Shared grouping pass: (group value, numeric measures) in first-seen group
/// order. Linear scan per row; group cardinality here is dropdown-sized.
fn grouped_measures(table: &Table, group_key: &str, measure_key: &str) -> Vec<(Value, Vec<f64>)> {
    let mut groups: Vec<(Value, Vec<f64>)> = Vec::new();
    for row in &table.rows {
        let Some(group) = row.get(group_key) else {
            continue;
        };
        let Some(measure) = row.get(measure_key).and_then(Value::as_f64) else {
            continue;
        };
        match groups.iter_mut().find(|(g, _)| g == group) {
            Some((_, measures)) => measures.push(measure),
            None => groups.push((group.clone(), vec![measure])),
        }
    }
    groups
}

/// The first `n` rows ordered by `rank_col` ascending, as (rank, label)
/// pairs. The sort is stable, so equal ranks keep their dataset order —
/// the same first-seen tie-break as the top-skill KPI.
pub fn ranked_top_n(
    table: &Table,
    rank_col: &str,
    label_col: &str,
    n: usize,
) -> Vec<(f64, String)> {
    let mut ranked: Vec<(f64, String)> = table
        .rows
        .iter()
        .filter_map(|row| {
            let rank = row.get(rank_col).and_then(Value::as_f64)?;
            let label = row.get(label_col)?;
            Some((rank, label.to_string()))
        })
        .collect();
    ranked.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    ranked.truncate(n);
    ranked
}

/// The largest value in `rank_col`, or `None` when no row has a numeric
/// rank. The top-skills chart inverts ranks into bar heights; using the
/// actual maximum keeps the heights right however many skills are ranked.
pub fn max_rank(table: &Table, rank_col: &str) -> Option<f64> {
    table
        .rows
        .iter()
        .filter_map(|row| row.get(rank_col).and_then(Value::as_f64))
        .max_by(|a, b| a.total_cmp(b))
}

/// First row matching every selector key exactly, or `None` when no row
/// matches. "No data for this selection" is an expected, displayable state
/// (the roadmap panel shows a placeholder), distinct from an error.
pub fn lookup_detail<'a>(table: &'a Table, selector: &Selector) -> Option<&'a Row> {
    table.rows.iter().find(|row| {
        selector
            .iter()
            .all(|(dim, wanted)| row.get(dim) == Some(wanted))
    })
}
