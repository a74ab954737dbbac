use std::path::PathBuf;

use eframe::egui;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WorkforceLensApp {
    pub state: AppState,
}

impl WorkforceLensApp {
    /// Build the app and eagerly load the datasets from `data_dir`.
    /// A failed load keeps the app running with the error in the top bar.
    pub fn new(data_dir: PathBuf) -> Self {
        let mut state = AppState::new(data_dir.clone());
        state.load_from(&data_dir);
        Self { state }
    }
}

impl eframe::App for WorkforceLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("selector_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPI cards and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::dashboard(ui, &self.state);
        });
    }
}
