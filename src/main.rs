mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::WorkforceLensApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional first argument overrides the data directory.
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Workforce Lens – AI Labor-Market Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(WorkforceLensApp::new(data_dir)))),
    )
}
