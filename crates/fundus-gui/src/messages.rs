use std::path::PathBuf;
use std::time::Duration;

use fundus_core::error::FundusError;
use fundus_core::frame::{ColorFrame, SourceInfo};
use fundus_core::heatmap::SaliencyField;
use fundus_core::interact::BuildTicket;
use fundus_core::pipeline::config::HeatmapConfig;
use fundus_core::pipeline::HeatmapStage;
use fundus_core::report::AnalysisReport;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode an image, then enhance it and build its heatmap.
    /// Every result for this image carries `ticket`.
    LoadImage {
        path: PathBuf,
        ticket: BuildTicket,
        config: HeatmapConfig,
    },

    /// Save the flattened composite of the image `ticket` refers to.
    ExportHeatmap { path: PathBuf, ticket: BuildTicket },
}

/// Results sent from worker (or file dialog) threads back to UI thread.
pub enum WorkerResult {
    /// The user picked an image to open.
    FileChosen { path: PathBuf },

    /// Decoded source image, shown while the heatmap is built.
    ImageLoaded {
        ticket: BuildTicket,
        path: PathBuf,
        frame: ColorFrame,
        info: SourceInfo,
    },

    /// The image itself could not be opened.
    ImageFailed {
        ticket: BuildTicket,
        message: String,
    },

    /// Heatmap built: enhanced base, saliency grid and flattened view.
    HeatmapReady {
        ticket: BuildTicket,
        base: ColorFrame,
        field: SaliencyField,
        flattened: ColorFrame,
        elapsed: Duration,
    },

    HeatmapFailed {
        ticket: BuildTicket,
        error: FundusError,
    },

    /// Progress update during a heatmap build.
    Progress {
        ticket: BuildTicket,
        stage: HeatmapStage,
    },

    ReportLoaded {
        path: PathBuf,
        report: AnalysisReport,
    },

    ConfigImported { config: HeatmapConfig },

    ImageSaved { path: PathBuf },

    Error { message: String },
}
