use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use fundus_core::frame::ImageId;
use fundus_core::interact::{HeatmapSession, Point};
use fundus_core::io::image_io::load_color_image;
use fundus_core::preprocess::enhance;
use fundus_core::report::AnalysisReport;

use super::load_config;

#[derive(Args)]
pub struct InspectArgs {
    /// Input fundus image (PNG or JPEG)
    pub file: PathBuf,

    /// Pointer x, in view pixels from the view's left edge
    #[arg(long, allow_negative_numbers = true)]
    pub x: f32,

    /// Pointer y, in view pixels from the view's top edge
    #[arg(long, allow_negative_numbers = true)]
    pub y: f32,

    /// Zoom level (1-5, rounded up to the next 0.5 step)
    #[arg(long, default_value = "1.0")]
    pub zoom: f32,

    /// Horizontal pan offset in view pixels
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub pan_x: f32,

    /// Vertical pan offset in view pixels
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub pan_y: f32,

    /// View width in pixels (defaults to the enhanced image width)
    #[arg(long)]
    pub view_width: Option<f32>,

    /// View height in pixels (defaults to the enhanced image height)
    #[arg(long)]
    pub view_height: Option<f32>,

    /// Report finding used to refine labels (repeatable)
    #[arg(long = "finding")]
    pub findings: Vec<String>,

    /// Diagnostic report JSON whose key findings are added
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Heatmap config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip the enhancement stage
    #[arg(long)]
    pub no_preprocess: bool,
}

pub fn run(args: &InspectArgs) -> Result<()> {
    if !(1.0..=5.0).contains(&args.zoom) {
        bail!("--zoom must be between 1 and 5, got {}", args.zoom);
    }

    let mut config = load_config(args.config.as_deref())?;
    if args.no_preprocess {
        config.preprocess.enabled = false;
    }

    let mut findings = args.findings.clone();
    if let Some(ref path) = args.report {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report {}", path.display()))?;
        let report = AnalysisReport::from_json(&json)
            .with_context(|| format!("Invalid report {}", path.display()))?;
        findings.extend(report.key_findings);
    }

    let frame = load_color_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let base = enhance(&frame, &config.preprocess);

    let mut session = HeatmapSession::new();
    let field = session.build_saliency(ImageId::next(), &base, &config.saliency)?;
    session.set_findings(findings);

    while session.viewport().zoom() < args.zoom {
        session.zoom_in();
    }
    if session.pan_start(Point::ZERO) {
        session.pan_move(Point::new(args.pan_x, args.pan_y));
        session.pan_end();
    }

    let view_w = args.view_width.unwrap_or(base.width() as f32);
    let view_h = args.view_height.unwrap_or(base.height() as f32);
    let pointer = Point::new(args.x, args.y);

    println!(
        "View:      {view_w}x{view_h} at {:.0}%, pan ({}, {})",
        session.viewport().zoom() * 100.0,
        session.viewport().pan_offset().x,
        session.viewport().pan_offset().y
    );

    let Some(cell) = session
        .viewport()
        .grid_cell(pointer, view_w, view_h, field.grid_size())
    else {
        println!("Pointer ({}, {}) is outside the image", args.x, args.y);
        return Ok(());
    };
    let intensity = field.intensity_at(cell).unwrap_or(0.0);
    println!("Cell:      ({}, {}), intensity {intensity:.3}", cell.x, cell.y);

    match session.inspect_hotspot(pointer, view_w, view_h) {
        Some(tooltip) => println!("Hotspot:   {}", tooltip.label),
        None => println!("Hotspot:   none"),
    }

    Ok(())
}
