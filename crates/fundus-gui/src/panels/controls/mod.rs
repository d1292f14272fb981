mod file;
mod findings;
mod histogram;
mod history;
mod view;

const LEFT_PANEL_WIDTH: f32 = 280.0;

pub fn show(ctx: &egui::Context, app: &mut crate::app::FundusApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                file::file_section(ui, app);
                ui.separator();
                view::view_section(ui, app);
                ui.separator();
                findings::findings_section(ui, app);
                ui.separator();
                histogram::histogram_section(ui, app);
                ui.separator();
                history::history_section(ui, app);
            });
        });
}
