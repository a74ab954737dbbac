use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::SeriesColors;
use crate::state::DashboardView;

const CHART_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Job trends (line chart)
// ---------------------------------------------------------------------------

/// Summed job postings per year for the selected country.
pub fn trend_chart(ui: &mut Ui, view: &DashboardView, country: &str) {
    ui.strong(format!("Job trends over time ({country})"));

    let points: PlotPoints = view
        .trend
        .iter()
        .map(|&(year, postings)| [year as f64, postings])
        .collect();

    Plot::new("job_trends")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Job postings")
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Job postings")
                    .color(Color32::LIGHT_BLUE)
                    .width(2.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Average salary by role (bar chart)
// ---------------------------------------------------------------------------

pub fn salary_chart(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Average salary by role");

    if view.salary_by_role.is_empty() {
        ui.label("No salary data for this selection.");
        return;
    }

    let labels: Vec<String> = view.salary_by_role.iter().map(|(r, _)| r.clone()).collect();
    let colors = SeriesColors::new(labels.iter().map(String::as_str));

    let bars: Vec<Bar> = view
        .salary_by_role
        .iter()
        .enumerate()
        .map(|(i, (role, mean))| {
            Bar::new(i as f64, *mean)
                .name(role)
                .fill(colors.color_for(role))
                .width(0.6)
        })
        .collect();

    labeled_bar_plot(ui, "salary_by_role", labels, "Average salary", bars);
}

// ---------------------------------------------------------------------------
// Top skills (inverse-rank bar chart)
// ---------------------------------------------------------------------------

/// Bar height inverts the rank so rank 1 is the tallest bar. The inversion
/// uses the dataset's actual maximum rank (`max + 1 - rank`) rather than a
/// hard-coded top-20 assumption.
pub fn skills_chart(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Top skills in demand");

    if view.top_skills.is_empty() {
        ui.label("No ranked skills available.");
        return;
    }

    let labels: Vec<String> = view.top_skills.iter().map(|(_, s)| s.clone()).collect();
    let colors = SeriesColors::new(labels.iter().map(String::as_str));

    let bars: Vec<Bar> = view
        .top_skills
        .iter()
        .enumerate()
        .map(|(i, (rank, skill))| {
            let height = view.skills_max_rank + 1.0 - rank;
            Bar::new(i as f64, height)
                .name(format!("#{rank} {skill}"))
                .fill(colors.color_for(skill))
                .width(0.6)
        })
        .collect();

    labeled_bar_plot(ui, "top_skills", labels, "Demand (inverse rank)", bars);
}

// ---------------------------------------------------------------------------
// Jobs created vs displaced (two-line chart)
// ---------------------------------------------------------------------------

pub fn displacement_chart(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Jobs created vs displaced by AI");

    if view.displacement.is_empty() {
        ui.label("No displacement data for this selection.");
        return;
    }

    let created: PlotPoints = view
        .displacement
        .iter()
        .map(|&(year, created, _)| [year as f64, created])
        .collect();
    let displaced: PlotPoints = view
        .displacement
        .iter()
        .map(|&(year, _, displaced)| [year as f64, displaced])
        .collect();

    Plot::new("displacement")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Jobs")
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(created)
                    .name("Jobs created by AI")
                    .color(Color32::from_rgb(0x4c, 0xaf, 0x50))
                    .width(2.0),
            );
            plot_ui.line(
                Line::new(displaced)
                    .name("Job displacement by AI")
                    .color(Color32::from_rgb(0xe5, 0x39, 0x35))
                    .width(2.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Skills penetration by industry (bar chart)
// ---------------------------------------------------------------------------

pub fn penetration_chart(ui: &mut Ui, view: &DashboardView) {
    ui.strong("AI skills penetration by industry");

    if view.penetration.is_empty() {
        ui.label("No penetration data available.");
        return;
    }

    let labels: Vec<String> = view.penetration.iter().map(|(i, _)| i.clone()).collect();
    let colors = SeriesColors::new(labels.iter().map(String::as_str));

    let bars: Vec<Bar> = view
        .penetration
        .iter()
        .enumerate()
        .map(|(i, (industry, rate))| {
            Bar::new(i as f64, *rate)
                .name(industry)
                .fill(colors.color_for(industry))
                .width(0.6)
        })
        .collect();

    labeled_bar_plot(ui, "penetration", labels, "Penetration rate", bars);
}

// ---------------------------------------------------------------------------
// Shared bar-plot scaffolding
// ---------------------------------------------------------------------------

/// A bar plot whose x axis shows categorical labels at integer positions.
/// The label order is exactly the order of the grouped query output.
fn labeled_bar_plot(ui: &mut Ui, id: &str, labels: Vec<String>, y_label: &str, bars: Vec<Bar>) {
    Plot::new(id.to_string())
        .height(CHART_HEIGHT)
        .y_axis_label(y_label)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if idx < 0.0 || (mark.value - idx).abs() > f64::EPSILON {
                return String::new();
            }
            labels
                .get(idx as usize)
                .map(|l| truncate_label(l))
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Keep axis labels readable on narrow charts.
fn truncate_label(label: &str) -> String {
    const MAX: usize = 14;
    if label.chars().count() <= MAX {
        label.to_string()
    } else {
        let head: String = label.chars().take(MAX - 1).collect();
        format!("{head}…")
    }
}
