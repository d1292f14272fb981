use crate::frame::ColorFrame;
use crate::heatmap::overlay::OverlayComposite;
use crate::heatmap::saliency::SaliencyField;

/// Heatmap processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeatmapStage {
    Preprocessing,
    BuildingSaliency,
    Compositing,
    Flattening,
}

impl std::fmt::Display for HeatmapStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preprocessing => write!(f, "Enhancing image"),
            Self::BuildingSaliency => write!(f, "Building saliency"),
            Self::Compositing => write!(f, "Compositing overlay"),
            Self::Flattening => write!(f, "Flattening export"),
        }
    }
}

/// Everything the heatmap view and its exports need for one image.
#[derive(Clone, Debug)]
pub struct HeatmapOutput {
    /// The enhanced image the heatmap was derived from.
    pub base: ColorFrame,
    pub field: SaliencyField,
    pub overlay: OverlayComposite,
    /// Base with the overlay blended in, ready to save.
    pub flattened: ColorFrame,
}

/// Thread-safe progress reporting for the heatmap pipeline.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started.
    fn begin_stage(&self, _stage: HeatmapStage) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_heatmap` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
