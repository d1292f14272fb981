use fundus_core::consts::{MAX_ZOOM, MIN_ZOOM};
use fundus_core::interact::HeatmapStatus;

use crate::app::FundusApp;
use crate::states::ViewTab;

pub(super) fn view_section(ui: &mut egui::Ui, app: &mut FundusApp) {
    let status = app.session.status().clone();
    let status_label = match status {
        HeatmapStatus::NoImage => None,
        HeatmapStatus::Pending => Some("Building\u{2026}"),
        HeatmapStatus::Ready => Some("Ready"),
        HeatmapStatus::Unavailable(_) => Some("Unavailable"),
    };
    crate::panels::section_header(ui, "View", status_label);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.selectable_value(&mut app.viewport.tab, ViewTab::Original, "Original");
        ui.selectable_value(&mut app.viewport.tab, ViewTab::Heatmap, "Heatmap");
    });

    if let HeatmapStatus::Unavailable(ref reason) = status {
        ui.colored_label(
            egui::Color32::from_rgb(230, 120, 80),
            format!("Heatmap unavailable: {reason}"),
        );
    } else if status == HeatmapStatus::Pending {
        ui.horizontal(|ui| {
            ui.spinner();
            match app.ui_state.running_stage {
                Some(stage) => ui.small(format!("{stage}\u{2026}")),
                None => ui.small("Building\u{2026}"),
            };
        });
    }

    ui.add_space(4.0);
    let zoom = app.session.viewport().zoom();
    ui.horizontal(|ui| {
        if ui
            .add_enabled(zoom > MIN_ZOOM, egui::Button::new("\u{2212}"))
            .on_hover_text("Zoom out")
            .clicked()
        {
            app.session.zoom_out();
        }
        ui.label(format!("{:.0}%", zoom * 100.0));
        if ui
            .add_enabled(zoom < MAX_ZOOM, egui::Button::new("+"))
            .on_hover_text("Zoom in")
            .clicked()
        {
            app.session.zoom_in();
        }
        if ui.button("Reset").clicked() {
            app.session.reset_view();
        }
    });
    if zoom > MIN_ZOOM {
        ui.small("Drag to pan");
    }
}
