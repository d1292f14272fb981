use std::path::PathBuf;

use fundus_core::frame::SourceInfo;
use fundus_core::pipeline::HeatmapStage;
use fundus_core::report::AnalysisReport;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub file_path: Option<PathBuf>,
    pub source_info: Option<SourceInfo>,

    /// Stage of the heatmap build in progress (None = idle).
    pub running_stage: Option<HeatmapStage>,

    /// Report loaded for the current image.
    pub report: Option<AnalysisReport>,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.running_stage.is_some()
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
