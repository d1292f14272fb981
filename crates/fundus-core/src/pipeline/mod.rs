pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{run_heatmap, run_heatmap_reported};
pub use types::{HeatmapOutput, HeatmapStage, ProgressReporter};
