use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fundus_core::frame::SourceInfo;
use fundus_core::heatmap::build_saliency;
use fundus_core::io::image_io::load_color_image;
use fundus_core::pipeline::config::SaliencyConfig;

#[derive(Args)]
pub struct InfoArgs {
    /// Input fundus image (PNG or JPEG)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let frame = load_color_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let info = SourceInfo::of(&frame);
    let field = build_saliency(&frame, &SaliencyConfig::default())?;
    let (gw, gh) = field.grid_size();
    let [r, g, b] = info.mean_color.map(|c| (c * 255.0).round() as u8);

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Mean color:  rgb({r}, {g}, {b})");
    println!("Grid:        {gw}x{gh}");
    println!(
        "Hot cells:   {} of {} ({:.1}%)",
        field.hot_cell_count(),
        gw * gh,
        field.hot_cell_count() as f64 * 100.0 / (gw * gh) as f64
    );

    Ok(())
}
