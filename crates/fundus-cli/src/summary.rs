use std::path::PathBuf;

use console::Style;
use fundus_core::pipeline::config::HeatmapConfig;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

/// Files written by the `heatmap` command.
pub struct HeatmapOutputs {
    pub input: PathBuf,
    pub heat: PathBuf,
    pub overlay: PathBuf,
    pub flattened: PathBuf,
}

pub fn print_heatmap_summary(config: &HeatmapConfig, outputs: &HeatmapOutputs) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Fundus Heatmap"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(14)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(outputs.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Heat"),
        s.path.apply_to(outputs.heat.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Overlay"),
        s.path.apply_to(outputs.overlay.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Export"),
        s.path.apply_to(outputs.flattened.display())
    );
    println!();

    let pre = &config.preprocess;
    if pre.enabled {
        println!("  {}", s.header.apply_to("Enhancement"));
        println!(
            "    {:<12}{}",
            s.label.apply_to("Max size"),
            s.value.apply_to(format!("{} px", pre.max_dimension))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Contrast"),
            s.value.apply_to(pre.contrast)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Brightness"),
            s.value.apply_to(pre.brightness)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Saturation"),
            s.value.apply_to(pre.saturation)
        );
    } else {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Enhancement"),
            s.disabled.apply_to("disabled")
        );
    }
    println!();

    let sal = &config.saliency;
    println!("  {}", s.header.apply_to("Saliency"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Grid"),
        s.value.apply_to(format!("{}x{}", sal.grid_width, sal.grid_height))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Scale"),
        s.value.apply_to(sal.intensity_scale)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Alpha"),
        s.value.apply_to(sal.heat_alpha)
    );
    println!();

    let ov = &config.overlay;
    println!("  {}", s.header.apply_to("Overlay"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Blend"),
        s.method.apply_to(ov.blend)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Opacity"),
        s.value.apply_to(format!("{:.0}%", ov.opacity * 100.0))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Blur"),
        s.value.apply_to(format!("{} px", ov.blur_sigma))
    );
    println!();
}
