use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

use fundus_core::frame::{ColorFrame, SourceInfo};
use fundus_core::interact::BuildTicket;
use fundus_core::io::image_io::{load_color_image, save_color_image};
use fundus_core::pipeline::config::HeatmapConfig;
use fundus_core::pipeline::run_heatmap_reported;
use tracing::{debug, info};

use crate::messages::{WorkerCommand, WorkerResult};
use crate::progress::ChannelProgressReporter;

/// Flattened composite of the last image built on the worker thread.
struct ExportCache {
    ticket: Option<BuildTicket>,
    flattened: Option<ColorFrame>,
}

impl ExportCache {
    fn new() -> Self {
        Self {
            ticket: None,
            flattened: None,
        }
    }

    fn reset(&mut self, ticket: BuildTicket) {
        self.ticket = Some(ticket);
        self.flattened = None;
    }

    fn flattened_for(&self, ticket: BuildTicket) -> Option<&ColorFrame> {
        if self.ticket == Some(ticket) {
            self.flattened.as_ref()
        } else {
            None
        }
    }
}

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("fundus-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    let mut cache = ExportCache::new();

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadImage {
                path,
                ticket,
                config,
            } => {
                handle_load_image(path, ticket, &config, &mut cache, &tx, &ctx);
            }
            WorkerCommand::ExportHeatmap { path, ticket } => {
                handle_export(&path, ticket, &cache, &tx, &ctx);
            }
        }
    }
}

fn handle_load_image(
    path: PathBuf,
    ticket: BuildTicket,
    config: &HeatmapConfig,
    cache: &mut ExportCache,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    cache.reset(ticket);

    let frame = match load_color_image(&path) {
        Ok(frame) => frame,
        Err(e) => {
            send(
                tx,
                ctx,
                WorkerResult::ImageFailed {
                    ticket,
                    message: e.to_string(),
                },
            );
            return;
        }
    };

    send(
        tx,
        ctx,
        WorkerResult::ImageLoaded {
            ticket,
            path: path.clone(),
            info: SourceInfo::of(&frame),
            frame: frame.clone(),
        },
    );

    let start = Instant::now();
    let reporter = ChannelProgressReporter::new(tx.clone(), ctx.clone(), ticket);
    match run_heatmap_reported(&frame, config, &reporter) {
        Ok(output) => {
            info!(image = %ticket.image_id, path = %path.display(), "Heatmap built");
            cache.flattened = Some(output.flattened.clone());
            send(
                tx,
                ctx,
                WorkerResult::HeatmapReady {
                    ticket,
                    base: output.base,
                    field: output.field,
                    flattened: output.flattened,
                    elapsed: start.elapsed(),
                },
            );
        }
        Err(error) => {
            debug!(image = %ticket.image_id, %error, "Heatmap build failed");
            send(tx, ctx, WorkerResult::HeatmapFailed { ticket, error });
        }
    }
}

fn handle_export(
    path: &Path,
    ticket: BuildTicket,
    cache: &ExportCache,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let Some(flattened) = cache.flattened_for(ticket) else {
        send_error(tx, ctx, "Heatmap unavailable for export");
        return;
    };

    match save_color_image(flattened, path) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::ImageSaved {
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Export failed: {e}")),
    }
}
