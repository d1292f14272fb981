use std::path::{Path, PathBuf};
use std::sync::mpsc;

use fundus_core::frame::{ColorFrame, ImageId};
use fundus_core::interact::{BuildOutcome, HeatmapSession};
use fundus_core::pipeline::config::HeatmapConfig;
use fundus_core::report::{AnalysisReport, HistoricalResult, HistoryStore};

use crate::convert::color_frame_to_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{UIState, ViewportState};
use crate::worker;

/// History file, relative to the working directory.
pub const HISTORY_FILE: &str = "fundus_history.json";

pub struct FundusApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub session: HeatmapSession,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub config: HeatmapConfig,
    pub history: Option<HistoryStore>,
    pub show_about: bool,
}

impl FundusApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone());

        let mut ui_state = UIState::default();
        let history = match HistoryStore::open(Path::new(HISTORY_FILE)) {
            Ok(store) => Some(store),
            Err(e) => {
                ui_state.add_log(format!("ERROR: {e}"));
                None
            }
        };

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            session: HeatmapSession::new(),
            ui_state,
            viewport: ViewportState::default(),
            config: HeatmapConfig::default(),
            history,
            show_about: false,
        }
    }

    /// Display a new image and queue its heatmap build.
    pub fn open_image(&mut self, path: PathBuf) {
        let ticket = self.session.show_image(ImageId::next());
        self.viewport.clear();
        self.ui_state.file_path = Some(path.clone());
        self.ui_state.source_info = None;
        self.ui_state.report = None;
        self.session.set_findings(Vec::new());
        self.send_command(WorkerCommand::LoadImage {
            path,
            ticket,
            config: self.config.clone(),
        });
    }

    /// Reopen a past analysis with its report. Nothing new is recorded.
    pub fn reopen_history(&mut self, entry: &HistoricalResult) {
        self.open_image(entry.image_path.clone());
        self.session.set_findings(entry.report.key_findings.clone());
        self.ui_state.report = Some(entry.report.clone());
        self.ui_state
            .add_log(format!("Reopened history entry {}", entry.id));
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::FileChosen { path } => {
                    self.open_image(path);
                }
                WorkerResult::ImageLoaded {
                    ticket,
                    path,
                    frame,
                    info,
                } => {
                    if !self.session.is_current(&ticket) {
                        continue;
                    }
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}x{})",
                        path.display(),
                        info.width,
                        info.height
                    ));
                    self.ui_state.source_info = Some(info);
                    self.set_original_texture(ctx, &frame);
                }
                WorkerResult::ImageFailed { ticket, message } => {
                    if self.session.mark_unavailable(ticket, message.clone()) {
                        self.ui_state.running_stage = None;
                        self.ui_state.add_log(format!("ERROR: {message}"));
                    }
                }
                WorkerResult::HeatmapReady {
                    ticket,
                    base,
                    field,
                    flattened,
                    elapsed,
                } => match self.session.complete_build(ticket, Ok(field)) {
                    BuildOutcome::Applied => {
                        self.ui_state.running_stage = None;
                        self.set_original_texture(ctx, &base);
                        let texture = ctx.load_texture(
                            "heatmap",
                            color_frame_to_image(&flattened),
                            egui::TextureOptions::LINEAR,
                        );
                        self.viewport.heatmap = Some(texture);
                        self.ui_state.add_log(format!(
                            "Heatmap ready in {}",
                            format_duration(elapsed)
                        ));
                    }
                    BuildOutcome::Stale | BuildOutcome::Failed => {}
                },
                WorkerResult::HeatmapFailed { ticket, error } => {
                    let message = error.to_string();
                    if self.session.complete_build(ticket, Err(error)) == BuildOutcome::Failed {
                        self.ui_state.running_stage = None;
                        self.viewport.heatmap = None;
                        self.ui_state.add_log(format!("ERROR: {message}"));
                    }
                }
                WorkerResult::Progress { ticket, stage } => {
                    if self.session.is_current(&ticket) {
                        self.ui_state.running_stage = Some(stage);
                    }
                }
                WorkerResult::ReportLoaded { path, report } => {
                    self.apply_report(&path, report);
                }
                WorkerResult::ConfigImported { config } => {
                    self.config = config;
                    self.ui_state.add_log("Config imported".into());
                    if let Some(path) = self.ui_state.file_path.clone() {
                        let report = self.ui_state.report.take();
                        let findings = self.session.findings().to_vec();
                        self.open_image(path);
                        self.session.set_findings(findings);
                        self.ui_state.report = report;
                    }
                }
                WorkerResult::ImageSaved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    /// Use a report's findings for the current image and record it in history.
    fn apply_report(&mut self, report_path: &Path, report: AnalysisReport) {
        self.session.set_findings(report.key_findings.clone());
        self.ui_state.add_log(format!(
            "Report loaded: {} ({} findings)",
            report_path.display(),
            report.key_findings.len()
        ));

        let image = self.ui_state.file_path.clone();
        if let (Some(store), Some(image)) = (self.history.as_mut(), image) {
            match store.record(&image, report.clone(), None) {
                Ok(entry) => self.ui_state.add_log(format!("History entry {}", entry.id)),
                Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
            }
        }
        self.ui_state.report = Some(report);
    }

    fn set_original_texture(&mut self, ctx: &egui::Context, frame: &ColorFrame) {
        let image = color_frame_to_image(frame);
        let size = image.size;
        let texture = ctx.load_texture("original", image, egui::TextureOptions::LINEAR);
        self.viewport.original = Some(texture);
        self.viewport.image_size = Some(size);
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for FundusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.show_about {
            egui::Window::new("About Fundus")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Fundus");
                        ui.label("Saliency heatmaps for retinal photographs");
                        ui.small("Heuristic color saliency, not a model attention map");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", d.as_millis())
    } else {
        format!("{secs:.1}s")
    }
}
