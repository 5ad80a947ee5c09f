use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Selection table (central panel)
// ---------------------------------------------------------------------------

/// Render the picked questions with a remove button per row.
pub fn selection_table(ui: &mut Ui, state: &mut AppState) {
    if state.workbook.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a question file to start  (File → Open…)");
        });
        return;
    }
    if state.selection.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No questions selected yet.");
        });
        return;
    }

    let mut remove = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder().clip(true))
        .column(Column::auto())
        .column(Column::auto())
        .header(22.0, |mut header| {
            for title in ["#", "Topic", "Question", "Level", ""] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (index, q) in state.selection.iter().enumerate() {
                body.row(22.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label((index + 1).to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&q.topic);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&q.text).on_hover_text(&q.text);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(q.level.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        if ui.small_button("Remove").clicked() {
                            remove = Some(index);
                        }
                    });
                });
            }
        });

    if let Some(index) = remove {
        state.remove_question(index);
    }
}
