use fundus_core::interact::{HeatmapStatus, Point, Tooltip, Viewport};

use crate::app::FundusApp;
use crate::states::ViewTab;

/// Pointer-to-tooltip offset in screen pixels.
const TOOLTIP_OFFSET: egui::Vec2 = egui::vec2(14.0, 14.0);

pub fn show(ctx: &egui::Context, app: &mut FundusApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let texture_id = app.viewport.active_texture().map(|t| t.id());
        let (Some(texture_id), Some(image_size)) = (texture_id, app.viewport.image_size) else {
            show_placeholder(ui);
            return;
        };

        let view = fitted_view_rect(rect, image_size);
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        handle_pan(&response, app, view);
        if response.double_clicked() {
            app.session.reset_view();
        }
        handle_hover(&response, app, view);

        let painter = ui.painter_at(rect);
        painter.image(
            texture_id,
            transformed_rect(view, app.session.viewport()),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if let Some(tooltip) = app.session.tooltip() {
            draw_tooltip(&painter, tooltip, view);
        }
        draw_viewing_label(ui, rect, app.viewport.tab, app.session.status());
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// The unzoomed view rectangle: the image scaled to fit `rect`, centered.
fn fitted_view_rect(rect: egui::Rect, image_size: [usize; 2]) -> egui::Rect {
    let image = egui::vec2(image_size[0].max(1) as f32, image_size[1].max(1) as f32);
    let fit = (rect.width() / image.x).min(rect.height() / image.y);
    egui::Rect::from_center_size(rect.center(), image * fit)
}

/// Where the image is drawn: the view scaled by zoom about its top-left,
/// then translated by the pan offset.
fn transformed_rect(view: egui::Rect, viewport: &Viewport) -> egui::Rect {
    let pan = viewport.pan_offset();
    egui::Rect::from_min_size(
        view.min + egui::vec2(pan.x, pan.y),
        view.size() * viewport.zoom(),
    )
}

fn to_view_point(pos: egui::Pos2, view: egui::Rect) -> Point {
    Point::new(pos.x - view.min.x, pos.y - view.min.y)
}

fn handle_pan(response: &egui::Response, app: &mut FundusApp, view: egui::Rect) {
    let pointer = response.interact_pointer_pos().map(|p| to_view_point(p, view));

    if response.drag_started_by(egui::PointerButton::Primary) {
        if let Some(p) = pointer {
            app.session.pan_start(p);
        }
    } else if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(p) = pointer {
            app.session.pan_move(p);
        }
    }

    if response.drag_stopped_by(egui::PointerButton::Primary) {
        app.session.pan_end();
    }
}

fn handle_hover(response: &egui::Response, app: &mut FundusApp, view: egui::Rect) {
    if app.viewport.tab != ViewTab::Heatmap {
        app.session.hide_tooltip();
        return;
    }
    match response.hover_pos() {
        Some(pos) => {
            app.session
                .inspect_hotspot(to_view_point(pos, view), view.width(), view.height());
        }
        None => app.session.hide_tooltip(),
    }
}

fn draw_tooltip(painter: &egui::Painter, tooltip: &Tooltip, view: egui::Rect) {
    if !tooltip.visible {
        return;
    }
    let anchor = view.min + egui::vec2(tooltip.position.x, tooltip.position.y) + TOOLTIP_OFFSET;
    let galley = painter.layout_no_wrap(
        tooltip.label.clone(),
        egui::FontId::proportional(13.0),
        egui::Color32::WHITE,
    );
    let background = egui::Rect::from_min_size(anchor, galley.size()).expand(5.0);
    painter.rect_filled(background, 4.0, egui::Color32::from_black_alpha(210));
    painter.rect_stroke(
        background,
        4.0,
        egui::Stroke::new(1.0, egui::Color32::from_rgb(255, 90, 60)),
        egui::epaint::StrokeKind::Outside,
    );
    painter.galley(anchor, galley, egui::Color32::WHITE);
}

fn draw_viewing_label(ui: &egui::Ui, rect: egui::Rect, tab: ViewTab, status: &HeatmapStatus) {
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    let color = match (tab, status) {
        (ViewTab::Heatmap, HeatmapStatus::Unavailable(_)) => egui::Color32::from_rgb(230, 120, 80),
        _ => egui::Color32::from_white_alpha(200),
    };
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        tab.caption(status),
        egui::FontId::proportional(14.0),
        color,
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open a fundus image to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
