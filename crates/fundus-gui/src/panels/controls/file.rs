use crate::app::FundusApp;
use crate::panels::menu_bar::open_image;

pub(super) fn file_section(ui: &mut egui::Ui, app: &mut FundusApp) {
    crate::panels::section_header(ui, "Image", None);
    ui.add_space(4.0);

    if ui.button("Open Image...").clicked() {
        open_image(app);
    }

    if let Some(ref path) = app.ui_state.file_path {
        ui.label(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
    }

    if let Some(ref info) = app.ui_state.source_info {
        let [r, g, b] = info.mean_color.map(|c| (c * 255.0).round() as u8);
        ui.small(format!("{}x{}", info.width, info.height));
        ui.horizontal(|ui| {
            ui.small("Mean color");
            let (swatch, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            ui.painter()
                .rect_filled(swatch, 2.0, egui::Color32::from_rgb(r, g, b));
            ui.small(format!("rgb({r}, {g}, {b})"));
        });
    }
}
