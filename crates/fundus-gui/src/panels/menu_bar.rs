use std::path::Path;

use anyhow::Context;
use fundus_core::interact::HeatmapStatus;
use fundus_core::pipeline::config::HeatmapConfig;
use fundus_core::report::AnalysisReport;

use crate::app::FundusApp;
use crate::messages::{WorkerCommand, WorkerResult};

pub fn show(ctx: &egui::Context, app: &mut FundusApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Image...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_image(app);
                }

                let report_enabled = app.session.active_image().is_some();
                if ui.add_enabled(report_enabled, egui::Button::new("Load Report...")).clicked() {
                    ui.close();
                    load_report(app);
                }

                let export_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                let export_enabled = *app.session.status() == HeatmapStatus::Ready;
                if ui
                    .add_enabled(
                        export_enabled,
                        egui::Button::new("Export Heatmap...").shortcut_text(ctx.format_shortcut(&export_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    export_heatmap(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Config").clicked() {
                    ui.close();
                    app.config = HeatmapConfig::default();
                    app.ui_state.add_log("Config reset to defaults".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_image(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S))) {
            export_heatmap(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub(crate) fn open_image(app: &mut FundusApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = result_tx.send(WorkerResult::FileChosen { path });
        }
    });
}

fn load_report(app: &mut FundusApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };
        let msg = match read_report(&path) {
            Ok(report) => WorkerResult::ReportLoaded { path, report },
            Err(e) => WorkerResult::Error {
                message: format!("{e:#}"),
            },
        };
        let _ = result_tx.send(msg);
    });
}

fn read_report(path: &Path) -> anyhow::Result<AnalysisReport> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    AnalysisReport::from_json(&json)
        .with_context(|| format!("Invalid report {}", path.display()))
}

fn export_heatmap(app: &mut FundusApp) {
    let Some(ticket) = app.session.current_ticket() else {
        return;
    };
    if *app.session.status() != HeatmapStatus::Ready {
        app.ui_state
            .add_log(format!("ERROR: cannot export, {}", app.session.status()));
        return;
    }

    let file_name = app
        .ui_state
        .file_path
        .as_ref()
        .and_then(|p| p.file_stem())
        .map(|s| format!("{}_heatmap.png", s.to_string_lossy()))
        .unwrap_or_else(|| "heatmap.png".into());

    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name(file_name)
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::ExportHeatmap { path, ticket });
        }
    });
}

fn import_config(app: &mut FundusApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let msg = match HeatmapConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("Invalid config {}: {e}", path.display()),
            },
        };
        let _ = result_tx.send(msg);
    });
}

fn export_config(app: &mut FundusApp) {
    let config = app.config.clone();
    let result_tx = app.result_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("fundus_config.toml")
            .save_file()
        {
            if let Err(e) = config.save(&path) {
                let _ = result_tx.send(WorkerResult::Error {
                    message: format!("Failed to save config: {e}"),
                });
            }
        }
    });
}
