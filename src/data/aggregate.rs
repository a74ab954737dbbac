use std::collections::BTreeMap;

use super::error::DataError;
use super::model::{Table, Value};
use super::store::columns;

// ---------------------------------------------------------------------------
// KPI aggregations
// ---------------------------------------------------------------------------

/// Sum of job postings over the rows whose `Country` equals `country`.
/// A country absent from the table simply contributes nothing: the result
/// is 0, not an error.
pub fn total_jobs(table: &Table, country: &str) -> f64 {
    table
        .rows
        .iter()
        .filter(|row| {
            row.get(columns::COUNTRY)
                .is_some_and(|v| v.matches_str(country))
        })
        .filter_map(|row| row.get(columns::TOTAL_JOB_POSTINGS).and_then(Value::as_f64))
        .sum()
}

/// Arithmetic mean of the `Salary` column across all rows.
///
/// The mean of zero values is undefined, so an empty table (or one where no
/// salary cell is numeric) fails with [`DataError::EmptyDataset`] instead of
/// silently returning 0.
pub fn average_salary(table: &Table) -> Result<f64, DataError> {
    let salaries: Vec<f64> = table
        .rows
        .iter()
        .filter_map(|row| row.get(columns::SALARY).and_then(Value::as_f64))
        .collect();

    if salaries.is_empty() {
        return Err(DataError::EmptyDataset {
            dataset: table.name.clone(),
            statistic: "average salary".to_string(),
        });
    }
    Ok(salaries.iter().sum::<f64>() / salaries.len() as f64)
}

/// The skill whose `Ranking` value is numerically minimum (rank 1 is the
/// most in demand). When several rows share the minimum rank, the first in
/// dataset iteration order wins — a defined, deterministic tie-break.
/// `None` only when the table has no ranked rows.
pub fn top_ranked_skill(table: &Table) -> Option<String> {
    let mut best: Option<(f64, String)> = None;
    for row in &table.rows {
        let Some(rank) = row.get(columns::RANKING).and_then(Value::as_f64) else {
            continue;
        };
        let Some(skill) = row.get(columns::SKILL) else {
            continue;
        };
        // Strict `<` keeps the earlier row on ties.
        if best.as_ref().map_or(true, |(r, _)| rank < *r) {
            best = Some((rank, skill.to_string()));
        }
    }
    best.map(|(_, skill)| skill)
}

/// Year-over-year growth of summed job postings for `country`, in percent.
///
/// Rows matching the country filter are grouped by `Year` and their postings
/// summed; growth is `(latest - previous) / previous * 100` over the two
/// most recent distinct years. Returns 0 when fewer than two distinct years
/// exist, and 0 when the previous year's sum is exactly 0 — a deliberate
/// saturating policy so a cold-start year never renders as a division error.
pub fn year_over_year_growth(table: &Table, country: &str) -> f64 {
    let per_year = postings_per_year(table, country);
    if per_year.len() < 2 {
        return 0.0;
    }

    let mut iter = per_year.values().rev();
    let latest = *iter.next().unwrap_or(&0.0);
    let previous = *iter.next().unwrap_or(&0.0);

    if previous == 0.0 {
        return 0.0;
    }
    (latest - previous) / previous * 100.0
}

/// Summed postings per year for one country, ascending by year.
/// Also backs the job-trends line chart.
pub fn postings_per_year(table: &Table, country: &str) -> BTreeMap<i64, f64> {
    let mut per_year: BTreeMap<i64, f64> = BTreeMap::new();
    for row in &table.rows {
        if !row
            .get(columns::COUNTRY)
            .is_some_and(|v| v.matches_str(country))
        {
            continue;
        }
        let Some(year) = row.get(columns::YEAR).and_then(Value::as_i64) else {
            continue;
        };
        let postings = row
            .get(columns::TOTAL_JOB_POSTINGS)
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        *per_year.entry(year).or_insert(0.0) += postings;
    }
    per_year
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn demand_row(country: &str, year: i64, postings: i64) -> Row {
        Row::from_pairs([
            (
                columns::COUNTRY.to_string(),
                Value::String(country.to_string()),
            ),
            (columns::YEAR.to_string(), Value::Integer(year)),
            (
                columns::TOTAL_JOB_POSTINGS.to_string(),
                Value::Integer(postings),
            ),
        ])
    }

    fn demand_table(rows: Vec<Row>) -> Table {
        let cols = [columns::COUNTRY, columns::YEAR, columns::TOTAL_JOB_POSTINGS]
            .iter()
            .map(|c| (*c).to_string())
            .collect();
        Table::new("compute job demand", cols, rows)
    }

    fn salary_table(salaries: &[i64]) -> Table {
        let rows = salaries
            .iter()
            .map(|s| Row::from_pairs([(columns::SALARY.to_string(), Value::Integer(*s))]))
            .collect();
        Table::new("salaries", vec![columns::SALARY.to_string()], rows)
    }

    fn skill_table(rows: &[(i64, &str)]) -> Table {
        let rows = rows
            .iter()
            .map(|(rank, skill)| {
                Row::from_pairs([
                    (columns::RANKING.to_string(), Value::Integer(*rank)),
                    (columns::SKILL.to_string(), Value::String((*skill).into())),
                ])
            })
            .collect();
        let cols = vec![columns::RANKING.to_string(), columns::SKILL.to_string()];
        Table::new("global top skills", cols, rows)
    }

    #[test]
    fn total_jobs_sums_only_the_matching_country() {
        let table = demand_table(vec![
            demand_row("Global", 2023, 100),
            demand_row("India", 2023, 40),
            demand_row("Global", 2024, 150),
        ]);
        assert_eq!(total_jobs(&table, "Global"), 250.0);
        assert_eq!(total_jobs(&table, "India"), 40.0);
    }

    #[test]
    fn total_jobs_for_an_absent_country_is_zero() {
        let table = demand_table(vec![demand_row("Global", 2023, 100)]);
        assert_eq!(total_jobs(&table, "Atlantis"), 0.0);
    }

    #[test]
    fn average_salary_is_the_arithmetic_mean() {
        let table = salary_table(&[50_000, 70_000, 90_000]);
        assert_eq!(average_salary(&table).unwrap(), 70_000.0);
    }

    #[test]
    fn average_salary_on_empty_table_fails() {
        let table = salary_table(&[]);
        let err = average_salary(&table).unwrap_err();
        assert!(matches!(err, DataError::EmptyDataset { .. }));
    }

    #[test]
    fn top_skill_breaks_ties_by_first_seen() {
        let table = skill_table(&[(2, "X"), (1, "Y"), (1, "Z")]);
        assert_eq!(top_ranked_skill(&table), Some("Y".to_string()));
    }

    #[test]
    fn top_skill_on_empty_table_is_none() {
        let table = skill_table(&[]);
        assert_eq!(top_ranked_skill(&table), None);
    }

    #[test]
    fn growth_uses_the_two_most_recent_years() {
        let table = demand_table(vec![
            demand_row("Global", 2021, 999), // older years don't matter
            demand_row("Global", 2022, 100),
            demand_row("Global", 2023, 150),
        ]);
        assert_eq!(year_over_year_growth(&table, "Global"), 50.0);
    }

    #[test]
    fn growth_saturates_to_zero_when_previous_year_is_zero() {
        let table = demand_table(vec![
            demand_row("Global", 2022, 0),
            demand_row("Global", 2023, 100),
        ]);
        assert_eq!(year_over_year_growth(&table, "Global"), 0.0);
    }

    #[test]
    fn growth_is_zero_with_fewer_than_two_years() {
        let single = demand_table(vec![demand_row("Global", 2023, 100)]);
        assert_eq!(year_over_year_growth(&single, "Global"), 0.0);

        let empty = demand_table(vec![]);
        assert_eq!(year_over_year_growth(&empty, "Global"), 0.0);
    }

    #[test]
    fn growth_sums_split_rows_within_a_year() {
        let table = demand_table(vec![
            demand_row("Global", 2022, 60),
            demand_row("Global", 2022, 40),
            demand_row("Global", 2023, 150),
        ]);
        assert_eq!(year_over_year_growth(&table, "Global"), 50.0);
    }
}
