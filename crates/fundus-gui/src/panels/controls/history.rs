use crate::app::{FundusApp, HISTORY_FILE};

/// Entries shown before the list scrolls.
const VISIBLE_ENTRIES: f32 = 8.0;

pub(super) fn history_section(ui: &mut egui::Ui, app: &mut FundusApp) {
    let count = app.history.as_ref().map(|h| h.len()).unwrap_or(0);
    let status = format!("{count}");
    crate::panels::section_header(ui, "History", Some(&status));
    ui.add_space(4.0);

    let Some(store) = app.history.as_ref() else {
        ui.small(format!("{HISTORY_FILE} could not be read"));
        return;
    };
    if store.is_empty() {
        ui.small("No analyses yet");
        return;
    }

    let mut reopen = None;
    let mut remove = None;
    let row_height = ui.text_style_height(&egui::TextStyle::Body) + ui.spacing().item_spacing.y;

    egui::ScrollArea::vertical()
        .id_salt("history_list")
        .max_height(row_height * VISIBLE_ENTRIES)
        .show(ui, |ui| {
            for entry in store.entries() {
                let name = entry
                    .image_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| entry.id.clone());
                ui.horizontal(|ui| {
                    if ui
                        .link(name)
                        .on_hover_text(entry.image_path.display().to_string())
                        .clicked()
                    {
                        reopen = Some(entry.clone());
                    }
                    ui.small(entry.report.severity.to_string());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("\u{00d7}").clicked() {
                            remove = Some(entry.id.clone());
                        }
                    });
                });
            }
        });

    if let Some(entry) = reopen {
        app.reopen_history(&entry);
    }
    if let Some(id) = remove {
        if let Some(store) = app.history.as_mut() {
            if let Err(e) = store.remove(&id) {
                app.ui_state.add_log(format!("ERROR: {e}"));
            }
        }
    }
}
