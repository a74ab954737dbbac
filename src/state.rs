use std::path::{Path, PathBuf};

use crate::data::aggregate;
use crate::data::error::DataError;
use crate::data::model::Value;
use crate::data::query::{self, selector_from};
use crate::data::store::{columns, DatasetStore, SourceId, GLOBAL};

/// How many ranked skills the top-skills chart shows.
pub const TOP_SKILLS_SHOWN: usize = 10;

// ---------------------------------------------------------------------------
// Selections – current dropdown choices
// ---------------------------------------------------------------------------

/// The user's current dropdown choices. `None` means "All" (no constraint)
/// for that dimension. A fresh selector is built from these on every
/// recompute; nothing here survives past producing one view.
#[derive(Debug, Clone)]
pub struct Selections {
    pub trend_country: String,
    pub salary_country: Option<Value>,
    pub salary_industry: Option<Value>,
    pub displacement_country: Option<Value>,
    pub displacement_industry: Option<Value>,
    pub roadmap_role: Option<Value>,
    pub roadmap_level: Option<Value>,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            trend_country: GLOBAL.to_string(),
            salary_country: None,
            salary_industry: None,
            displacement_country: None,
            displacement_industry: None,
            roadmap_role: None,
            roadmap_level: None,
        }
    }
}

// ---------------------------------------------------------------------------
// DashboardView – everything the presentation layer draws
// ---------------------------------------------------------------------------

/// The four headline scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub total_jobs: f64,
    pub growth_pct: f64,
    pub average_salary: f64,
    pub top_skill: String,
}

/// One career-roadmap row, resolved for the chosen role and level.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapDetail {
    pub role: String,
    pub level: String,
    pub skills: String,
    pub resources: String,
}

/// A fully computed dashboard: KPI scalars plus chart-ready tables.
/// Consumed by the UI only; recomputed from scratch on every selector
/// change and never mutated in place.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub kpis: Kpis,
    /// (year, summed postings) ascending by year, for the trend country.
    pub trend: Vec<(i64, f64)>,
    /// (role, mean salary) in first-seen role order.
    pub salary_by_role: Vec<(String, f64)>,
    /// (rank, skill) ascending by rank.
    pub top_skills: Vec<(f64, String)>,
    /// Actual maximum rank in the skills dataset; parameterizes the
    /// inverse-rank bar heights instead of assuming a fixed top-20.
    pub skills_max_rank: f64,
    /// (year, jobs created, jobs displaced) ascending by year.
    pub displacement: Vec<(i64, f64, f64)>,
    /// (industry, mean penetration rate) in first-seen industry order.
    pub penetration: Vec<(String, f64)>,
    /// `None` when no roadmap row matches the role/level selection; the
    /// panel shows a placeholder in that case.
    pub roadmap: Option<RoadmapDetail>,
}

/// Compute a complete view from the loaded store and the current
/// selections. Pure: same inputs, same view.
pub fn build_view(store: &DatasetStore, sel: &Selections) -> Result<DashboardView, DataError> {
    let demand = store.get(SourceId::ComputeJobDemand);
    let salaries = store.get(SourceId::Salaries);
    let skills = store.get(SourceId::GlobalTopSkills);
    let displacement = store.get(SourceId::Displacement);
    let penetration = store.get(SourceId::SkillsPenetration);
    let career = store.get(SourceId::CareerPathway);

    let kpis = Kpis {
        total_jobs: aggregate::total_jobs(demand, GLOBAL),
        growth_pct: aggregate::year_over_year_growth(demand, GLOBAL),
        average_salary: aggregate::average_salary(salaries)?,
        top_skill: aggregate::top_ranked_skill(skills).unwrap_or_else(|| "—".to_string()),
    };

    let trend = aggregate::postings_per_year(demand, &sel.trend_country)
        .into_iter()
        .collect();

    let salary_sel = selector_from([
        (columns::COUNTRY, sel.salary_country.clone()),
        (columns::INDUSTRY, sel.salary_industry.clone()),
    ]);
    let salary_rows = query::filter_by_keys(salaries, &salary_sel);
    let salary_by_role = query::group_and_average(&salary_rows, columns::ROLE, columns::SALARY)
        .into_iter()
        .map(|(role, mean)| (role.to_string(), mean))
        .collect();

    let top_skills = query::ranked_top_n(skills, columns::RANKING, columns::SKILL, TOP_SKILLS_SHOWN);
    let skills_max_rank = query::max_rank(skills, columns::RANKING).unwrap_or(0.0);

    let displ_sel = selector_from([
        (columns::COUNTRY, sel.displacement_country.clone()),
        (columns::INDUSTRY, sel.displacement_industry.clone()),
    ]);
    let displ_rows = query::filter_by_keys(displacement, &displ_sel);
    let displacement = merge_by_year(
        query::group_and_sum(&displ_rows, columns::YEAR, columns::JOBS_CREATED),
        query::group_and_sum(&displ_rows, columns::YEAR, columns::JOB_DISPLACEMENT),
    );

    let penetration = query::group_and_average(
        penetration,
        columns::INDUSTRY,
        columns::PENETRATION_RATE,
    )
    .into_iter()
    .map(|(industry, mean)| (industry.to_string(), mean))
    .collect();

    let roadmap = match (&sel.roadmap_role, &sel.roadmap_level) {
        (Some(role), Some(level)) => {
            let road_sel = selector_from([
                (columns::ROLE, Some(role.clone())),
                (columns::LEVEL, Some(level.clone())),
            ]);
            query::lookup_detail(career, &road_sel).map(|row| RoadmapDetail {
                role: role.to_string(),
                level: level.to_string(),
                skills: row
                    .get(columns::SKILLS)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                resources: row
                    .get(columns::RESOURCES)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            })
        }
        _ => None,
    };

    Ok(DashboardView {
        kpis,
        trend,
        salary_by_role,
        top_skills,
        skills_max_rank,
        displacement,
        penetration,
        roadmap,
    })
}

/// Zip two (year, value) series into (year, created, displaced), ascending
/// by year; a year missing from one side contributes 0 there.
fn merge_by_year(created: Vec<(Value, f64)>, displaced: Vec<(Value, f64)>) -> Vec<(i64, f64, f64)> {
    let mut merged: std::collections::BTreeMap<i64, (f64, f64)> = std::collections::BTreeMap::new();
    for (year, v) in created {
        if let Some(y) = year.as_i64() {
            merged.entry(y).or_default().0 += v;
        }
    }
    for (year, v) in displaced {
        if let Some(y) = year.as_i64() {
            merged.entry(y).or_default().1 += v;
        }
    }
    merged
        .into_iter()
        .map(|(y, (c, d))| (y, c, d))
        .collect()
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Directory the datasets were (or will be) loaded from.
    pub data_dir: PathBuf,

    /// Loaded datasets (None until a load succeeds).
    pub store: Option<DatasetStore>,

    /// Current dropdown choices.
    pub selections: Selections,

    /// The computed dashboard (cached; rebuilt on selector change).
    pub view: Option<DashboardView>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            store: None,
            selections: Selections::default(),
            view: None,
            status_message: None,
        }
    }

    /// Load all datasets from a directory and compute the initial view.
    pub fn load_from(&mut self, dir: &Path) {
        match DatasetStore::load_dir(dir) {
            Ok(store) => {
                self.data_dir = dir.to_path_buf();
                self.set_store(store);
            }
            Err(e) => {
                log::error!("failed to load datasets: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a freshly loaded store, reset selections, compute the view.
    pub fn set_store(&mut self, store: DatasetStore) {
        self.selections = Selections::default();
        self.store = Some(store);
        self.status_message = None;
        self.recompute();
    }

    /// Rebuild the dashboard view from the current selections. Called
    /// synchronously whenever a dropdown changes; the frame that changed
    /// the selector already draws the new view.
    pub fn recompute(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        match build_view(store, &self.selections) {
            Ok(view) => self.view = Some(view),
            Err(e) => {
                log::error!("failed to compute dashboard: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Row, Table};
    use std::collections::BTreeMap;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    fn table(name: &str, cols: &[&str], rows: Vec<Vec<Value>>) -> Table {
        let columns: Vec<String> = cols.iter().map(|c| (*c).to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|vals| {
                Row::from_pairs(columns.iter().cloned().zip(vals))
            })
            .collect();
        Table::new(name, columns, rows)
    }

    fn synthetic_store() -> DatasetStore {
        let mut tables: BTreeMap<SourceId, Table> = BTreeMap::new();
        tables.insert(
            SourceId::ComputeJobDemand,
            table(
                "compute job demand",
                &["Country", "Year", "Total_Job_postings"],
                vec![
                    vec![s("Global"), Value::Integer(2022), Value::Integer(100)],
                    vec![s("Global"), Value::Integer(2023), Value::Integer(150)],
                    vec![s("India"), Value::Integer(2023), Value::Integer(30)],
                ],
            ),
        );
        tables.insert(
            SourceId::Salaries,
            table(
                "salaries",
                &["Country", "Industry", "Role", "Salary"],
                vec![
                    vec![s("US"), s("Tech"), s("ML Engineer"), Value::Integer(150_000)],
                    vec![s("US"), s("Tech"), s("Data Scientist"), Value::Integer(130_000)],
                    vec![s("DE"), s("Tech"), s("ML Engineer"), Value::Integer(110_000)],
                ],
            ),
        );
        tables.insert(
            SourceId::GlobalTopSkills,
            table(
                "global top skills",
                &["Ranking", "Skill"],
                vec![
                    vec![Value::Integer(2), s("Deep Learning")],
                    vec![Value::Integer(1), s("Machine Learning")],
                    vec![Value::Integer(3), s("NLP")],
                ],
            ),
        );
        tables.insert(
            SourceId::Displacement,
            table(
                "displacement",
                &[
                    "Country",
                    "Industry",
                    "Year",
                    "Jobs Created by AI",
                    "Job Displacement by AI",
                ],
                vec![
                    vec![
                        s("Global"),
                        s("Tech"),
                        Value::Integer(2023),
                        Value::Integer(50),
                        Value::Integer(20),
                    ],
                ],
            ),
        );
        tables.insert(
            SourceId::SkillsPenetration,
            table(
                "skills penetration",
                &["Industry", "Penetration_Rate"],
                vec![vec![s("Tech"), Value::Float(0.4)]],
            ),
        );
        tables.insert(
            SourceId::TalentConcentration,
            table(
                "talent concentration",
                &["Country", "Industry", "Talent_Concentration"],
                vec![vec![s("US"), s("Tech"), Value::Float(0.2)]],
            ),
        );
        tables.insert(
            SourceId::CareerPathway,
            table(
                "career pathway",
                &["Role", "Level", "Skills", "Resources"],
                vec![vec![
                    s("ML Engineer"),
                    s("Junior"),
                    s("Python, PyTorch"),
                    s("fast.ai course"),
                ]],
            ),
        );
        tables.insert(
            SourceId::SkillDistribution,
            table(
                "skill distribution",
                &["Job_Cluster", "Skill", "Share"],
                vec![vec![s("Engineering"), s("Python"), Value::Float(0.6)]],
            ),
        );
        DatasetStore::from_tables(tables).unwrap()
    }

    #[test]
    fn build_view_computes_the_headline_kpis() {
        let store = synthetic_store();
        let view = build_view(&store, &Selections::default()).unwrap();

        assert_eq!(view.kpis.total_jobs, 250.0);
        assert_eq!(view.kpis.growth_pct, 50.0);
        assert_eq!(view.kpis.average_salary, 130_000.0);
        assert_eq!(view.kpis.top_skill, "Machine Learning");
    }

    #[test]
    fn trend_follows_the_selected_country() {
        let store = synthetic_store();
        let mut sel = Selections::default();
        sel.trend_country = "India".to_string();
        let view = build_view(&store, &sel).unwrap();
        assert_eq!(view.trend, vec![(2023, 30.0)]);
    }

    #[test]
    fn salary_chart_respects_the_country_selector() {
        let store = synthetic_store();
        let mut sel = Selections::default();
        sel.salary_country = Some(s("DE"));
        let view = build_view(&store, &sel).unwrap();
        assert_eq!(view.salary_by_role, vec![("ML Engineer".to_string(), 110_000.0)]);
    }

    #[test]
    fn top_skills_are_ranked_and_bounded_by_the_actual_max() {
        let store = synthetic_store();
        let view = build_view(&store, &Selections::default()).unwrap();
        assert_eq!(view.top_skills[0], (1.0, "Machine Learning".to_string()));
        assert_eq!(view.skills_max_rank, 3.0);
    }

    #[test]
    fn roadmap_is_none_until_both_role_and_level_are_chosen() {
        let store = synthetic_store();
        let mut sel = Selections::default();
        sel.roadmap_role = Some(s("ML Engineer"));
        let view = build_view(&store, &sel).unwrap();
        assert!(view.roadmap.is_none());

        sel.roadmap_level = Some(s("Junior"));
        let view = build_view(&store, &sel).unwrap();
        let detail = view.roadmap.unwrap();
        assert_eq!(detail.skills, "Python, PyTorch");
        assert_eq!(detail.resources, "fast.ai course");
    }

    #[test]
    fn roadmap_with_no_matching_row_stays_a_placeholder_state() {
        let store = synthetic_store();
        let mut sel = Selections::default();
        sel.roadmap_role = Some(s("ML Engineer"));
        sel.roadmap_level = Some(s("Principal"));
        let view = build_view(&store, &sel).unwrap();
        assert!(view.roadmap.is_none());
    }
}
