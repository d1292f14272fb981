use egui_plot::{Bar, BarChart, Plot, VLine};
use fundus_core::consts::HOTSPOT_THRESHOLD;
use fundus_core::heatmap::{map_intensity, SaliencyField};

use crate::app::FundusApp;

/// Height of the intensity histogram in pixels.
const CHART_HEIGHT: f32 = 110.0;

const BIN_COUNT: usize = 20;

pub(super) fn histogram_section(ui: &mut egui::Ui, app: &mut FundusApp) {
    let field = app.session.field().cloned();
    let status = field
        .as_ref()
        .map(|f| format!("{} hot", f.hot_cell_count()));
    crate::panels::section_header(ui, "Saliency", status.as_deref());
    ui.add_space(4.0);

    match field {
        Some(field) => intensity_chart(ui, &field),
        None => {
            ui.small("No saliency grid");
        }
    }
}

/// Bar chart of cell intensities, colored like the heatmap, with the
/// hotspot threshold marked.
fn intensity_chart(ui: &mut egui::Ui, field: &SaliencyField) {
    let counts = field.histogram(BIN_COUNT);
    let width = 1.0 / BIN_COUNT as f64;

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let center = (i as f64 + 0.5) * width;
            let rgb = map_intensity(center as f32);
            Bar::new(center, count as f64)
                .fill(egui::Color32::from_rgb(rgb.0[0], rgb.0[1], rgb.0[2]))
                .width(width * 0.9)
        })
        .collect();

    let chart = BarChart::new("intensity", bars);

    let threshold = VLine::new("hotspot threshold", HOTSPOT_THRESHOLD as f64)
        .color(egui::Color32::from_rgb(255, 160, 40))
        .width(1.5);

    Plot::new("intensity_histogram")
        .height(CHART_HEIGHT)
        .include_x(0.0)
        .include_x(1.0)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .x_axis_label("intensity")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            plot_ui.vline(threshold);
        });
}
