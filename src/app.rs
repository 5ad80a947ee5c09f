use eframe::egui;

use crate::config::Settings;
use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct QuestionPickerApp {
    pub state: AppState,
}

impl QuestionPickerApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }
}

impl eframe::App for QuestionPickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let blocked = self.state.blocking_error.is_some();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| panels::top_bar(ui, &mut self.state));
        });

        // ---- Left side panel: draw request ----
        egui::SidePanel::left("request_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| panels::side_panel(ui, &mut self.state));
            });

        // ---- Central panel: selection table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| table::selection_table(ui, &mut self.state));
        });

        // ---- Load errors must be acknowledged ----
        panels::blocking_error(ctx, &mut self.state);
    }
}
