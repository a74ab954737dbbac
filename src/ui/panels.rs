use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Value;
use crate::data::store::{columns, SourceId};
use crate::state::AppState;
use crate::ui::{cards, charts};

// ---------------------------------------------------------------------------
// Left side panel – selector widgets
// ---------------------------------------------------------------------------

/// Render the left selector panel. Any changed dropdown triggers one
/// synchronous recompute before the frame finishes.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(store) = &state.store else {
        ui.label("No datasets loaded.");
        return;
    };

    // Clone the option lists so we can mutate selections inside the loop.
    let trend_countries = store
        .get(SourceId::ComputeJobDemand)
        .distinct(columns::COUNTRY);
    let salary_countries = store.get(SourceId::Salaries).distinct(columns::COUNTRY);
    let salary_industries = store.get(SourceId::Salaries).distinct(columns::INDUSTRY);
    let displ_countries = store.get(SourceId::Displacement).distinct(columns::COUNTRY);
    let displ_industries = store.get(SourceId::Displacement).distinct(columns::INDUSTRY);
    let roadmap_roles = store.get(SourceId::CareerPathway).distinct(columns::ROLE);
    let roadmap_levels = store.get(SourceId::CareerPathway).distinct(columns::LEVEL);

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Job trends");
            changed |= country_combo(
                ui,
                "trend_country",
                &trend_countries,
                &mut state.selections.trend_country,
            );
            ui.separator();

            ui.strong("Salaries");
            changed |= optional_combo(
                ui,
                "salary_country",
                "Country",
                &salary_countries,
                &mut state.selections.salary_country,
            );
            changed |= optional_combo(
                ui,
                "salary_industry",
                "Industry",
                &salary_industries,
                &mut state.selections.salary_industry,
            );
            ui.separator();

            ui.strong("Displacement");
            changed |= optional_combo(
                ui,
                "displ_country",
                "Country",
                &displ_countries,
                &mut state.selections.displacement_country,
            );
            changed |= optional_combo(
                ui,
                "displ_industry",
                "Industry",
                &displ_industries,
                &mut state.selections.displacement_industry,
            );
            ui.separator();

            ui.strong("Career roadmap");
            changed |= optional_combo(
                ui,
                "roadmap_role",
                "Role",
                &roadmap_roles,
                &mut state.selections.roadmap_role,
            );
            changed |= optional_combo(
                ui,
                "roadmap_level",
                "Level",
                &roadmap_levels,
                &mut state.selections.roadmap_level,
            );
        });

    if changed {
        state.recompute();
    }
}

/// Dropdown over a required dimension (always has a concrete value).
fn country_combo(ui: &mut Ui, id: &str, options: &[Value], current: &mut String) -> bool {
    let mut changed = false;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for val in options {
                let label = val.to_string();
                if ui.selectable_label(*current == label, &label).clicked() && *current != label {
                    *current = label;
                    changed = true;
                }
            }
        });
    changed
}

/// Dropdown over an optional dimension; the extra "All" entry clears it.
fn optional_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    options: &[Value],
    current: &mut Option<Value>,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        let selected_text = current
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "All".to_string());
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected_text)
            .show_ui(ui, |ui: &mut Ui| {
                if ui.selectable_label(current.is_none(), "All").clicked() && current.is_some() {
                    *current = None;
                    changed = true;
                }
                for val in options {
                    let is_selected = current.as_ref() == Some(val);
                    if ui.selectable_label(is_selected, val.to_string()).clicked() && !is_selected {
                        *current = Some(val.clone());
                        changed = true;
                    }
                }
            });
    });
    changed
}

// ---------------------------------------------------------------------------
// Central panel – KPI cards, charts, roadmap
// ---------------------------------------------------------------------------

/// Render the dashboard body: KPI row, chart grid, roadmap detail.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a data folder to view the dashboard  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            cards::kpi_row(ui, &view.kpis);
            ui.add_space(8.0);

            ui.columns(2, |cols| {
                charts::trend_chart(&mut cols[0], view, &state.selections.trend_country);
                charts::salary_chart(&mut cols[1], view);
            });
            ui.add_space(8.0);
            ui.columns(2, |cols| {
                charts::skills_chart(&mut cols[0], view);
                charts::displacement_chart(&mut cols[1], view);
            });
            ui.add_space(8.0);
            charts::penetration_chart(ui, view);

            ui.add_space(8.0);
            ui.separator();
            roadmap_detail(ui, state);
        });
}

/// The career-roadmap panel: a small field/value table for the selected
/// role and level, or a placeholder when there is nothing to show.
fn roadmap_detail(ui: &mut Ui, state: &AppState) {
    ui.strong("Career roadmap");

    let both_chosen = state.selections.roadmap_role.is_some()
        && state.selections.roadmap_level.is_some();

    let Some(view) = &state.view else {
        return;
    };

    match &view.roadmap {
        Some(detail) => {
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto().at_least(90.0))
                .column(Column::remainder())
                .body(|mut body| {
                    let rows = [
                        ("Role", detail.role.as_str()),
                        ("Level", detail.level.as_str()),
                        ("Skills", detail.skills.as_str()),
                        ("Resources", detail.resources.as_str()),
                    ];
                    for (field, value) in rows {
                        body.row(20.0, |mut row| {
                            row.col(|ui| {
                                ui.strong(field);
                            });
                            row.col(|ui| {
                                ui.label(value);
                            });
                        });
                    }
                });
        }
        None if both_chosen => {
            // Expected empty state, not an error.
            ui.label("No roadmap data for this role and level.");
        }
        None => {
            ui.label("Choose a role and level to see a suggested roadmap.");
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                let dir = state.data_dir.clone();
                state.load_from(&dir);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(store) = &state.store {
            ui.label(format!(
                "{} datasets, {} rows — {}",
                SourceId::ALL.len(),
                store.total_rows(),
                state.data_dir.display()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open data folder")
        .pick_folder();

    if let Some(dir) = folder {
        state.load_from(&dir);
    }
}
