mod app;
mod config;
mod data;
mod export;
mod state;
mod ui;

use std::path::PathBuf;

use app::QuestionPickerApp;
use config::{Settings, DEFAULT_SETTINGS_FILE};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional settings file: first argument, else ./question-picker.json
    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    let settings = Settings::load_or_default(&settings_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Question Picker",
        options,
        Box::new(|_cc| Ok(Box::new(QuestionPickerApp::new(settings)))),
    )
}
