use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::charts::columns;
use crate::state::{AppState, TableGroup, View};

// ---------------------------------------------------------------------------
// Left side panel – dataset summary
// ---------------------------------------------------------------------------

/// Render the left summary panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dataset");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    if let Some(path) = &state.source_path {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        ui.label(RichText::new(name).strong()).on_hover_text(path.display().to_string());
    }

    egui::Grid::new("dataset_summary")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Rows");
            ui.label(dataset.len().to_string());
            ui.end_row();
            ui.label("Columns");
            ui.label(dataset.column_names.len().to_string());
            ui.end_row();
            for (label, column) in [
                ("Countries", columns::COUNTRY),
                ("Industries", columns::INDUSTRY),
                ("Tools", columns::TOP_TOOL),
            ] {
                ui.label(label);
                ui.label(dataset.distinct_count(column).to_string());
                ui.end_row();
            }
        });

    let missing: Vec<&str> = columns::REQUIRED
        .iter()
        .copied()
        .filter(|c| !dataset.has_column(c))
        .collect();
    if !missing.is_empty() {
        ui.separator();
        ui.label(RichText::new("Missing columns (read as 0):").color(Color32::YELLOW));
        for col in missing {
            ui.label(RichText::new(col).small());
        }
    }

    if state.view == View::Table {
        ui.separator();
        ui.strong("Group by");
        let current = state.table_group;
        for group in TableGroup::ALL {
            if ui.selectable_label(current == group, group.label()).clicked() && current != group {
                state.set_table_group(group);
            }
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
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if ui.selectable_label(state.view == View::Charts, "Charts").clicked() {
            state.view = View::Charts;
        }
        if ui.selectable_label(state.view == View::Table, "Table").clicked() {
            state.view = View::Table;
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            if ds.is_empty() {
                ui.label(RichText::new("Dataset has no rows").color(Color32::YELLOW));
            } else {
                ui.label(format!("{} rows loaded", ds.len()));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open AI impact dataset")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
