use std::collections::BTreeMap;
use std::path::Path;

use super::error::DataError;
use super::loader;
use super::model::Table;

// ---------------------------------------------------------------------------
// Well-known column names
// ---------------------------------------------------------------------------

/// Column names the core depends on, as they appear in the source headers.
pub mod columns {
    pub const COUNTRY: &str = "Country";
    pub const YEAR: &str = "Year";
    pub const TOTAL_JOB_POSTINGS: &str = "Total_Job_postings";
    pub const SALARY: &str = "Salary";
    pub const INDUSTRY: &str = "Industry";
    pub const ROLE: &str = "Role";
    pub const LEVEL: &str = "Level";
    pub const RANKING: &str = "Ranking";
    pub const SKILL: &str = "Skill";
    pub const SKILLS: &str = "Skills";
    pub const RESOURCES: &str = "Resources";
    pub const JOBS_CREATED: &str = "Jobs Created by AI";
    pub const JOB_DISPLACEMENT: &str = "Job Displacement by AI";
    pub const PENETRATION_RATE: &str = "Penetration_Rate";
    pub const TALENT_CONCENTRATION: &str = "Talent_Concentration";
    pub const JOB_CLUSTER: &str = "Job_Cluster";
    pub const SHARE: &str = "Share";
}

/// The country filter used for the headline KPIs.
pub const GLOBAL: &str = "Global";

// ---------------------------------------------------------------------------
// SourceId – the eight datasets
// ---------------------------------------------------------------------------

/// Identifies one of the eight tabular sources the dashboard is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceId {
    CareerPathway,
    ComputeJobDemand,
    Displacement,
    Salaries,
    SkillsPenetration,
    TalentConcentration,
    GlobalTopSkills,
    SkillDistribution,
}

impl SourceId {
    pub const ALL: [SourceId; 8] = [
        SourceId::CareerPathway,
        SourceId::ComputeJobDemand,
        SourceId::Displacement,
        SourceId::Salaries,
        SourceId::SkillsPenetration,
        SourceId::TalentConcentration,
        SourceId::GlobalTopSkills,
        SourceId::SkillDistribution,
    ];

    /// File name without extension; `.csv` and `.json` are both accepted.
    pub fn file_stem(self) -> &'static str {
        match self {
            SourceId::CareerPathway => "AI_Career_Pathway_Dataset",
            SourceId::ComputeJobDemand => "AI_Compute_Job_Demand",
            SourceId::Displacement => "AI_Job_Statistics_Displacement",
            SourceId::Salaries => "AI_Salaries",
            SourceId::SkillsPenetration => "AI_Skills_Penetration_by_Industry",
            SourceId::TalentConcentration => "AI_Talent_Concentration",
            SourceId::GlobalTopSkills => "Global_Top_Skills",
            SourceId::SkillDistribution => "Skill_Distribution_by_Job_Cluster",
        }
    }

    /// Logical dataset name used in errors and the UI.
    pub fn name(self) -> &'static str {
        match self {
            SourceId::CareerPathway => "career pathway",
            SourceId::ComputeJobDemand => "compute job demand",
            SourceId::Displacement => "displacement",
            SourceId::Salaries => "salaries",
            SourceId::SkillsPenetration => "skills penetration",
            SourceId::TalentConcentration => "talent concentration",
            SourceId::GlobalTopSkills => "global top skills",
            SourceId::SkillDistribution => "skill distribution",
        }
    }

    /// Columns the core reads from this source; checked at load time so a
    /// schema drift fails the startup instead of yielding silent empties.
    pub fn required_columns(self) -> &'static [&'static str] {
        use columns::*;
        match self {
            SourceId::CareerPathway => &[ROLE, LEVEL, SKILLS, RESOURCES],
            SourceId::ComputeJobDemand => &[COUNTRY, YEAR, TOTAL_JOB_POSTINGS],
            SourceId::Displacement => &[COUNTRY, INDUSTRY, YEAR, JOBS_CREATED, JOB_DISPLACEMENT],
            SourceId::Salaries => &[COUNTRY, INDUSTRY, ROLE, SALARY],
            SourceId::SkillsPenetration => &[INDUSTRY, PENETRATION_RATE],
            SourceId::TalentConcentration => &[COUNTRY, INDUSTRY, TALENT_CONCENTRATION],
            SourceId::GlobalTopSkills => &[RANKING, SKILL],
            SourceId::SkillDistribution => &[JOB_CLUSTER, SKILL, SHARE],
        }
    }
}

// ---------------------------------------------------------------------------
// DatasetStore – load-once, read-only context
// ---------------------------------------------------------------------------

/// All eight datasets, loaded once and read-only for the rest of the process.
/// Constructed explicitly and passed to the aggregation/query layer, so tests
/// can inject small synthetic tables instead of the real files.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    tables: BTreeMap<SourceId, Table>,
}

impl DatasetStore {
    /// Load every source from `dir`. Each source is tried as `<stem>.csv`
    /// then `<stem>.json`. Missing or empty sources are fatal.
    pub fn load_dir(dir: &Path) -> Result<Self, DataError> {
        let mut tables = BTreeMap::new();
        for id in SourceId::ALL {
            let table = load_source(dir, id)?;
            log::info!(
                "loaded {} ({} rows, columns {:?})",
                id.name(),
                table.len(),
                table.columns
            );
            tables.insert(id, table);
        }
        Self::from_tables(tables)
    }

    /// Build a store from already-parsed tables, applying the same row-count
    /// and schema validation as [`DatasetStore::load_dir`].
    pub fn from_tables(tables: BTreeMap<SourceId, Table>) -> Result<Self, DataError> {
        for id in SourceId::ALL {
            let table = tables
                .get(&id)
                .ok_or_else(|| DataError::source(id.name(), "dataset was not provided"))?;
            if table.is_empty() {
                return Err(DataError::source(id.name(), "contains no rows"));
            }
            for col in id.required_columns() {
                if !table.has_column(col) {
                    return Err(DataError::Schema {
                        dataset: id.name().to_string(),
                        column: (*col).to_string(),
                    });
                }
            }
        }
        Ok(DatasetStore { tables })
    }

    /// The table for one source. Always present: construction validated all
    /// eight sources.
    pub fn get(&self, id: SourceId) -> &Table {
        &self.tables[&id]
    }

    /// Total row count across every dataset (shown in the top bar).
    pub fn total_rows(&self) -> usize {
        self.tables.values().map(Table::len).sum()
    }
}

fn load_source(dir: &Path, id: SourceId) -> Result<Table, DataError> {
    let stem = id.file_stem();
    let path = ["csv", "json"]
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
        .ok_or_else(|| {
            DataError::source(
                id.name(),
                format!("{stem}.csv (or .json) not found in {}", dir.display()),
            )
        })?;
    loader::load_file(id.name(), &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Row, Value};

    fn tiny_table(name: &str, cols: &[&str]) -> Table {
        let row = Row::from_pairs(
            cols.iter()
                .map(|c| ((*c).to_string(), Value::String("x".into()))),
        );
        Table::new(name, cols.iter().map(|c| (*c).to_string()).collect(), vec![row])
    }

    fn full_set() -> BTreeMap<SourceId, Table> {
        SourceId::ALL
            .into_iter()
            .map(|id| (id, tiny_table(id.name(), id.required_columns())))
            .collect()
    }

    #[test]
    fn from_tables_accepts_a_complete_valid_set() {
        let store = DatasetStore::from_tables(full_set()).unwrap();
        assert_eq!(store.get(SourceId::Salaries).len(), 1);
        assert_eq!(store.total_rows(), 8);
    }

    #[test]
    fn missing_dataset_is_a_source_error() {
        let mut tables = full_set();
        tables.remove(&SourceId::GlobalTopSkills);
        let err = DatasetStore::from_tables(tables).unwrap_err();
        assert!(matches!(err, DataError::Source { ref source, .. }
            if source == "global top skills"));
    }

    #[test]
    fn dataset_with_zero_rows_is_a_source_error() {
        let mut tables = full_set();
        let cols: Vec<String> = SourceId::Salaries
            .required_columns()
            .iter()
            .map(|c| (*c).to_string())
            .collect();
        tables.insert(SourceId::Salaries, Table::new("salaries", cols, vec![]));
        let err = DatasetStore::from_tables(tables).unwrap_err();
        assert!(matches!(err, DataError::Source { ref source, .. } if source == "salaries"));
    }

    #[test]
    fn missing_required_column_is_a_schema_error() {
        let mut tables = full_set();
        tables.insert(
            SourceId::ComputeJobDemand,
            tiny_table("compute job demand", &[columns::COUNTRY, columns::YEAR]),
        );
        let err = DatasetStore::from_tables(tables).unwrap_err();
        assert!(matches!(err, DataError::Schema { ref column, .. }
            if column == columns::TOTAL_JOB_POSTINGS));
    }

    #[test]
    fn load_dir_reports_the_first_missing_file() {
        let err = DatasetStore::load_dir(Path::new("/nonexistent/data")).unwrap_err();
        assert!(matches!(err, DataError::Source { .. }));
    }
}
