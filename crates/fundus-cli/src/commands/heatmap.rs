use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use fundus_core::io::image_io::{load_color_image, save_color_image, save_overlay_png, save_rgba_png};
use fundus_core::pipeline::{run_heatmap_reported, HeatmapStage, ProgressReporter};
use tracing::info;

use super::{load_config, sibling_path};
use crate::summary::{print_heatmap_summary, HeatmapOutputs};

#[derive(Args)]
pub struct HeatmapArgs {
    /// Input fundus image (PNG or JPEG)
    pub file: PathBuf,

    /// Heatmap config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip the enhancement stage
    #[arg(long)]
    pub no_preprocess: bool,

    /// Where to save the grid-resolution heat image
    #[arg(long)]
    pub heat: Option<PathBuf>,

    /// Where to save the blurred overlay (RGBA PNG)
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// Flattened export path (PNG or JPEG)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: HeatmapStage) {
        self.pb.set_message(stage.to_string());
    }

    fn finish_stage(&self) {
        self.pb.inc(1);
    }
}

pub fn run(args: &HeatmapArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if args.no_preprocess {
        config.preprocess.enabled = false;
    }

    let outputs = HeatmapOutputs {
        input: args.file.clone(),
        heat: args
            .heat
            .clone()
            .unwrap_or_else(|| sibling_path(&args.file, "heat")),
        overlay: args
            .overlay
            .clone()
            .unwrap_or_else(|| sibling_path(&args.file, "overlay")),
        flattened: args
            .output
            .clone()
            .unwrap_or_else(|| sibling_path(&args.file, "heatmap")),
    };
    print_heatmap_summary(&config, &outputs);

    let frame = load_color_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:22} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { pb };
    let output = run_heatmap_reported(&frame, &config, &reporter)?;
    reporter.pb.finish_with_message("Done");

    save_rgba_png(output.field.heat_image(), &outputs.heat)
        .with_context(|| format!("Failed to write {}", outputs.heat.display()))?;
    save_overlay_png(&output.overlay, &outputs.overlay)
        .with_context(|| format!("Failed to write {}", outputs.overlay.display()))?;
    save_color_image(&output.flattened, &outputs.flattened)
        .with_context(|| format!("Failed to write {}", outputs.flattened.display()))?;

    let (gw, gh) = output.field.grid_size();
    info!(
        heat = %outputs.heat.display(),
        overlay = %outputs.overlay.display(),
        flattened = %outputs.flattened.display(),
        "Heatmap outputs written"
    );
    println!();
    println!(
        "Hot cells: {} of {}",
        output.field.hot_cell_count(),
        gw * gh
    );
    println!("Heatmap saved to {}", outputs.flattened.display());

    Ok(())
}
