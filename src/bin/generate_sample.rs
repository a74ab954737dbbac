//! Generates the eight sample CSV datasets into `data/`, so the dashboard
//! runs without the original source files. Deterministic: same seed, same
//! data.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

const COUNTRIES: [&str; 5] = ["Global", "United States", "India", "Germany", "United Kingdom"];
const INDUSTRIES: [&str; 4] = ["Technology", "Finance", "Healthcare", "Manufacturing"];
const ROLES: [&str; 4] = ["ML Engineer", "Data Scientist", "AI Researcher", "Data Engineer"];
const LEVELS: [&str; 3] = ["Junior", "Mid", "Senior"];
const YEARS: [i64; 5] = [2020, 2021, 2022, 2023, 2024];

// ---------------------------------------------------------------------------
// Row types (column names must match the loader's expectations)
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DemandRow {
    #[serde(rename = "Country")]
    country: &'static str,
    #[serde(rename = "Year")]
    year: i64,
    #[serde(rename = "Total_Job_postings")]
    total_job_postings: i64,
}

#[derive(Serialize)]
struct SalaryRow {
    #[serde(rename = "Country")]
    country: &'static str,
    #[serde(rename = "Industry")]
    industry: &'static str,
    #[serde(rename = "Role")]
    role: &'static str,
    #[serde(rename = "Salary")]
    salary: i64,
}

#[derive(Serialize)]
struct DisplacementRow {
    #[serde(rename = "Country")]
    country: &'static str,
    #[serde(rename = "Industry")]
    industry: &'static str,
    #[serde(rename = "Year")]
    year: i64,
    #[serde(rename = "Jobs Created by AI")]
    jobs_created: i64,
    #[serde(rename = "Job Displacement by AI")]
    job_displacement: i64,
}

#[derive(Serialize)]
struct PenetrationRow {
    #[serde(rename = "Industry")]
    industry: &'static str,
    #[serde(rename = "Year")]
    year: i64,
    #[serde(rename = "Penetration_Rate")]
    penetration_rate: f64,
}

#[derive(Serialize)]
struct ConcentrationRow {
    #[serde(rename = "Country")]
    country: &'static str,
    #[serde(rename = "Industry")]
    industry: &'static str,
    #[serde(rename = "Talent_Concentration")]
    talent_concentration: f64,
}

#[derive(Serialize)]
struct TopSkillRow {
    #[serde(rename = "Ranking")]
    ranking: i64,
    #[serde(rename = "Skill")]
    skill: &'static str,
}

#[derive(Serialize)]
struct SkillDistributionRow {
    #[serde(rename = "Job_Cluster")]
    job_cluster: &'static str,
    #[serde(rename = "Skill")]
    skill: &'static str,
    #[serde(rename = "Share")]
    share: f64,
}

#[derive(Serialize)]
struct CareerPathwayRow {
    #[serde(rename = "Role")]
    role: &'static str,
    #[serde(rename = "Level")]
    level: &'static str,
    #[serde(rename = "Skills")]
    skills: String,
    #[serde(rename = "Resources")]
    resources: String,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

fn write_csv<T: Serialize>(dir: &Path, stem: &str, rows: &[T]) -> Result<()> {
    let path = dir.join(format!("{stem}.csv"));
    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("wrote {} ({} rows)", path.display(), rows.len());
    Ok(())
}

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);

    // Compute job demand: postings grow year over year, per country.
    let mut demand = Vec::new();
    for (ci, &country) in COUNTRIES.iter().enumerate() {
        let base = if country == "Global" { 80_000.0 } else { 12_000.0 + 4_000.0 * ci as f64 };
        for (yi, year) in YEARS.iter().enumerate() {
            let growth = 1.0 + 0.18 * yi as f64;
            let jitter = rng.range(0.9, 1.1);
            demand.push(DemandRow {
                country,
                year: *year,
                total_job_postings: (base * growth * jitter) as i64,
            });
        }
    }
    write_csv(&dir, "AI_Compute_Job_Demand", &demand)?;

    // Salaries: role baseline scaled by country and industry.
    let mut salaries = Vec::new();
    for (ci, &country) in COUNTRIES.iter().enumerate() {
        for (ii, &industry) in INDUSTRIES.iter().enumerate() {
            for (ri, &role) in ROLES.iter().enumerate() {
                let base = 90_000.0 + 15_000.0 * ri as f64;
                let scale = 1.0 + 0.1 * ii as f64 - 0.08 * ci as f64;
                let jitter = rng.range(0.92, 1.08);
                salaries.push(SalaryRow {
                    country,
                    industry,
                    role,
                    salary: (base * scale * jitter) as i64,
                });
            }
        }
    }
    write_csv(&dir, "AI_Salaries", &salaries)?;

    // Displacement: creation outpaces displacement in later years.
    let mut displacement = Vec::new();
    for country in COUNTRIES {
        for industry in INDUSTRIES {
            for (yi, year) in YEARS.iter().enumerate() {
                let created = rng.range(2_000.0, 6_000.0) * (1.0 + 0.3 * yi as f64);
                let displaced = rng.range(1_000.0, 3_000.0) * (1.0 + 0.15 * yi as f64);
                displacement.push(DisplacementRow {
                    country,
                    industry,
                    year: *year,
                    jobs_created: created as i64,
                    job_displacement: displaced as i64,
                });
            }
        }
    }
    write_csv(&dir, "AI_Job_Statistics_Displacement", &displacement)?;

    // Skills penetration by industry.
    let mut penetration = Vec::new();
    for industry in INDUSTRIES {
        for (yi, year) in YEARS.iter().enumerate() {
            penetration.push(PenetrationRow {
                industry,
                year: *year,
                penetration_rate: (rng.range(0.05, 0.25) * (1.0 + 0.2 * yi as f64)).min(1.0),
            });
        }
    }
    write_csv(&dir, "AI_Skills_Penetration_by_Industry", &penetration)?;

    // Talent concentration by country and industry.
    let mut concentration = Vec::new();
    for country in COUNTRIES {
        for industry in INDUSTRIES {
            concentration.push(ConcentrationRow {
                country,
                industry,
                talent_concentration: rng.range(0.02, 0.35),
            });
        }
    }
    write_csv(&dir, "AI_Talent_Concentration", &concentration)?;

    // Global top skills, ranked 1..20.
    let skills = [
        "Machine Learning",
        "Deep Learning",
        "Natural Language Processing",
        "Python",
        "Computer Vision",
        "MLOps",
        "Data Engineering",
        "Prompt Engineering",
        "Reinforcement Learning",
        "Statistics",
        "SQL",
        "Cloud Computing",
        "Model Deployment",
        "Data Visualization",
        "Distributed Systems",
        "Feature Engineering",
        "Experiment Design",
        "Ethics & Governance",
        "Speech Recognition",
        "Robotics",
    ];
    let top_skills: Vec<TopSkillRow> = skills
        .iter()
        .enumerate()
        .map(|(i, &skill)| TopSkillRow {
            ranking: i as i64 + 1,
            skill,
        })
        .collect();
    write_csv(&dir, "Global_Top_Skills", &top_skills)?;

    // Skill distribution by job cluster.
    let clusters = [
        ("Engineering", ["Python", "Distributed Systems", "MLOps"]),
        ("Research", ["Deep Learning", "Statistics", "Experiment Design"]),
        ("Analytics", ["SQL", "Data Visualization", "Statistics"]),
    ];
    let mut distribution = Vec::new();
    for (cluster, cluster_skills) in clusters {
        for skill in cluster_skills {
            distribution.push(SkillDistributionRow {
                job_cluster: cluster,
                skill,
                share: rng.range(0.1, 0.5),
            });
        }
    }
    write_csv(&dir, "Skill_Distribution_by_Job_Cluster", &distribution)?;

    // Career pathway: one roadmap row per role and level.
    let mut pathways = Vec::new();
    for role in ROLES {
        for (li, &level) in LEVELS.iter().enumerate() {
            let skills = match li {
                0 => format!("Python, SQL, fundamentals of {role} work"),
                1 => format!("Model building, deployment, {role} tooling"),
                _ => format!("System design, mentoring, {role} strategy"),
            };
            let resources = match li {
                0 => "Intro courses, guided projects".to_string(),
                1 => "Certifications, open-source contributions".to_string(),
                _ => "Conference talks, research papers".to_string(),
            };
            pathways.push(CareerPathwayRow {
                role,
                level,
                skills,
                resources,
            });
        }
    }
    write_csv(&dir, "AI_Career_Pathway_Dataset", &pathways)?;

    println!("done: sample datasets in {}", dir.display());
    Ok(())
}
