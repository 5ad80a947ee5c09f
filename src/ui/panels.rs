use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – draw request
// ---------------------------------------------------------------------------

/// Render the topic / level / count inputs and the add button.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Add questions");
    ui.separator();

    if state.workbook.is_none() {
        ui.label("No question file loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the widgets.
    let topic_names: Vec<String> = state.topics.iter().map(|t| t.name.clone()).collect();
    let levels = state.available_levels();

    ui.strong("Topic");
    let current_topic = state.selected_topic.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("topic")
        .width(ui.available_width())
        .selected_text(if current_topic.is_empty() {
            "Choose a topic"
        } else {
            current_topic.as_str()
        })
        .show_ui(ui, |ui: &mut Ui| {
            for name in &topic_names {
                if ui.selectable_label(current_topic == *name, name).clicked() {
                    state.select_topic(name.clone());
                }
            }
        });
    ui.add_space(6.0);

    ui.strong("Level");
    let level_text = state
        .selected_level
        .map(|l| l.to_string())
        .unwrap_or_else(|| "Choose a level".to_string());
    egui::ComboBox::from_id_salt("level")
        .width(ui.available_width())
        .selected_text(level_text)
        .show_ui(ui, |ui: &mut Ui| {
            for level in &levels {
                let selected = state.selected_level == Some(*level);
                if ui.selectable_label(selected, level.to_string()).clicked() {
                    state.select_level(*level);
                }
            }
        });
    ui.add_space(6.0);

    ui.strong("Number of questions");
    ui.add(egui::DragValue::new(&mut state.count).speed(1.0));
    ui.add_space(10.0);

    if ui.button("Add questions").clicked() {
        state.request_questions();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.selection.is_empty(), egui::Button::new("Export…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(wb) = &state.workbook {
            ui.label(format!(
                "{} topic(s), {} row(s) loaded, {} selected",
                wb.tables.len(),
                wb.row_count(),
                state.selection.len()
            ));
        }

        ui.separator();

        if let Some(status) = &state.status {
            let text = RichText::new(status.text());
            ui.label(if status.is_error() {
                text.color(Color32::RED)
            } else {
                text
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Blocking error window
// ---------------------------------------------------------------------------

pub fn blocking_error(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.blocking_error.clone() else {
        return;
    };
    egui::Window::new("Could not load file")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(RichText::new(message).color(Color32::RED));
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                state.dismiss_error();
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open question file")
        .add_filter("Supported files", &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"])
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("OpenDocument", &["ods"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export selected questions")
        .set_file_name(state.settings.export.default_file_name.as_str())
        .add_filter("Word document", &["docx"])
        .add_filter("Plain text", &["txt"])
        .save_file();

    if let Some(path) = file {
        state.export(&path);
    }
}
