use tracing::info;

use crate::error::Result;
use crate::frame::ColorFrame;
use crate::heatmap::overlay::{composite, flatten};
use crate::heatmap::saliency::build_saliency;
use crate::preprocess::enhance;

use super::config::HeatmapConfig;
use super::types::{HeatmapOutput, HeatmapStage, NoOpReporter, ProgressReporter};

/// Run enhancement, saliency, compositing and flattening on one image.
pub fn run_heatmap_reported(
    frame: &ColorFrame,
    config: &HeatmapConfig,
    reporter: &dyn ProgressReporter,
) -> Result<HeatmapOutput> {
    config.validate()?;

    reporter.begin_stage(HeatmapStage::Preprocessing);
    let base = enhance(frame, &config.preprocess);
    reporter.finish_stage();
    info!(width = base.width(), height = base.height(), "Image enhanced");

    reporter.begin_stage(HeatmapStage::BuildingSaliency);
    let field = build_saliency(&base, &config.saliency)?;
    reporter.finish_stage();
    let (gw, gh) = field.grid_size();
    info!(
        grid_width = gw,
        grid_height = gh,
        hot_cells = field.hot_cell_count(),
        "Saliency field built"
    );

    reporter.begin_stage(HeatmapStage::Compositing);
    let overlay = composite(
        field.heat_image(),
        base.width(),
        base.height(),
        config.overlay.blur_sigma,
    )?;
    reporter.finish_stage();

    reporter.begin_stage(HeatmapStage::Flattening);
    let flattened = flatten(&base, &overlay, config.overlay.opacity, config.overlay.blend)?;
    reporter.finish_stage();
    info!(blend = %config.overlay.blend, opacity = config.overlay.opacity, "Overlay flattened");

    Ok(HeatmapOutput {
        base,
        field,
        overlay,
        flattened,
    })
}

/// Run the heatmap pipeline without progress reporting.
pub fn run_heatmap(frame: &ColorFrame, config: &HeatmapConfig) -> Result<HeatmapOutput> {
    run_heatmap_reported(frame, config, &NoOpReporter)
}
