use std::sync::mpsc;

use fundus_core::interact::BuildTicket;
use fundus_core::pipeline::{HeatmapStage, ProgressReporter};

use crate::messages::WorkerResult;

/// Progress reporter that sends stage changes over an mpsc channel to the UI thread.
pub struct ChannelProgressReporter {
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    ticket: BuildTicket,
}

impl ChannelProgressReporter {
    pub fn new(tx: mpsc::Sender<WorkerResult>, ctx: egui::Context, ticket: BuildTicket) -> Self {
        Self { tx, ctx, ticket }
    }
}

impl ProgressReporter for ChannelProgressReporter {
    fn begin_stage(&self, stage: HeatmapStage) {
        let _ = self.tx.send(WorkerResult::Progress {
            ticket: self.ticket,
            stage,
        });
        self.ctx.request_repaint();
    }
}
