mod common;

use std::sync::Arc;

use fundus_core::error::FundusError;
use fundus_core::frame::ImageId;
use fundus_core::interact::{BuildOutcome, HeatmapSession, HeatmapStatus, Point};
use fundus_core::pipeline::config::SaliencyConfig;

use common::{field_with_cell, frame_with_patch, strings};

const VIEW: f32 = 640.0;

/// Session showing one image whose cell (1, 1) is a hot, dark red spot.
fn ready_session() -> HeatmapSession {
    let mut session = HeatmapSession::new();
    let ticket = session.show_image(ImageId::next());
    let outcome = session.complete_build(ticket, Ok(field_with_cell(64, (1, 1), 0.9, [140, 90, 80])));
    assert_eq!(outcome, BuildOutcome::Applied);
    session
}

#[test]
fn test_new_session_has_no_image() {
    let session = HeatmapSession::new();
    assert_eq!(*session.status(), HeatmapStatus::NoImage);
    assert!(session.active_image().is_none());
    assert!(session.current_ticket().is_none());
    assert!(session.field().is_none());
}

#[test]
fn test_show_image_issues_pending_ticket() {
    let mut session = HeatmapSession::new();
    let id = ImageId::next();
    let ticket = session.show_image(id);
    assert_eq!(ticket.image_id, id);
    assert_eq!(*session.status(), HeatmapStatus::Pending);
    assert!(session.is_current(&ticket));

    // re-showing the same image keeps the ticket
    assert_eq!(session.show_image(id), ticket);
}

#[test]
fn test_stale_build_is_discarded() {
    let mut session = HeatmapSession::new();
    let first = session.show_image(ImageId::next());
    let second = session.show_image(ImageId::next());
    assert_ne!(first, second);

    let outcome = session.complete_build(first, Ok(field_with_cell(64, (0, 0), 1.0, [255, 255, 255])));
    assert_eq!(outcome, BuildOutcome::Stale);
    assert!(session.field().is_none());
    assert_eq!(*session.status(), HeatmapStatus::Pending);

    let outcome = session.complete_build(second, Ok(field_with_cell(64, (2, 2), 1.0, [255, 255, 255])));
    assert_eq!(outcome, BuildOutcome::Applied);
    assert_eq!(*session.status(), HeatmapStatus::Ready);
    assert_eq!(session.field().unwrap().hot_cell_count(), 1);
}

#[test]
fn test_reshowing_old_image_invalidates_its_old_ticket() {
    let mut session = HeatmapSession::new();
    let a = ImageId::next();
    let old = session.show_image(a);
    session.show_image(ImageId::next());
    let new = session.show_image(a);
    assert_eq!(new.image_id, a);
    assert_ne!(old, new);
    assert_eq!(
        session.complete_build(old, Ok(field_with_cell(8, (0, 0), 1.0, [0, 0, 0]))),
        BuildOutcome::Stale
    );
}

#[test]
fn test_failed_build_marks_heatmap_unavailable() {
    let mut session = HeatmapSession::new();
    let ticket = session.show_image(ImageId::next());
    let outcome = session.complete_build(ticket, Err(FundusError::ImageDecode("truncated file".into())));
    assert_eq!(outcome, BuildOutcome::Failed);
    assert!(matches!(session.status(), HeatmapStatus::Unavailable(reason) if reason.contains("truncated")));
    assert!(session.field().is_none());
    assert!(session.inspect_hotspot(Point::new(15.0, 15.0), VIEW, VIEW).is_none());
}

#[test]
fn test_mark_unavailable_respects_ticket() {
    let mut session = HeatmapSession::new();
    let old = session.show_image(ImageId::next());
    let current = session.show_image(ImageId::next());
    assert!(!session.mark_unavailable(old, "decode failed"));
    assert_eq!(*session.status(), HeatmapStatus::Pending);
    assert!(session.mark_unavailable(current, "decode failed"));
    assert!(matches!(session.status(), HeatmapStatus::Unavailable(_)));
}

#[test]
fn test_build_saliency_reuses_existing_grid() {
    let mut session = HeatmapSession::new();
    let id = ImageId::next();
    let frame = frame_with_patch(64, 64, 8, [1.0, 1.0, 1.0]);
    let config = SaliencyConfig::default();

    let first = session.build_saliency(id, &frame, &config).unwrap();
    let second = session.build_saliency(id, &frame, &config).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*session.status(), HeatmapStatus::Ready);
}

#[test]
fn test_switching_image_drops_previous_grid_and_view() {
    let mut session = ready_session();
    session.zoom_in();
    session.zoom_in();
    assert_eq!(session.viewport().zoom(), 2.0);

    session.show_image(ImageId::next());
    assert!(session.field().is_none());
    assert_eq!(session.viewport().zoom(), 1.0);
    assert!(session.tooltip().is_none());
}

#[test]
fn test_hover_over_hot_cell_shows_tooltip() {
    let mut session = ready_session();
    // 640 px view over a 64 cell grid: cell (1, 1) spans 10..20
    let tip = session.inspect_hotspot(Point::new(15.0, 15.0), VIEW, VIEW).unwrap();
    assert_eq!(tip.label, "Vascular Anomaly");
    assert_eq!(tip.position, Point::new(15.0, 15.0));
    assert_eq!(session.tooltip(), Some(&tip));

    assert!(session.inspect_hotspot(Point::new(35.0, 15.0), VIEW, VIEW).is_none());
    assert!(session.tooltip().is_none());
}

#[test]
fn test_hover_outside_image_hides_tooltip() {
    let mut session = ready_session();
    session.inspect_hotspot(Point::new(15.0, 15.0), VIEW, VIEW);
    assert!(session.inspect_hotspot(Point::new(-5.0, 55.0), VIEW, VIEW).is_none());
    assert!(session.inspect_hotspot(Point::new(645.0, 55.0), VIEW, VIEW).is_none());
    assert!(session.tooltip().is_none());
}

#[test]
fn test_findings_refine_tooltip_label() {
    let mut session = ready_session();
    session.set_findings(strings(&["Dot hemorrhage noted"]));
    let tip = session.inspect_hotspot(Point::new(15.0, 15.0), VIEW, VIEW).unwrap();
    assert_eq!(tip.label, "Hemorrhage / Microaneurysm");
}

#[test]
fn test_findings_set_while_pending_survive_build() {
    let mut session = HeatmapSession::new();
    let ticket = session.show_image(ImageId::next());
    session.set_findings(strings(&["Dot hemorrhage noted"]));
    assert_eq!(*session.status(), HeatmapStatus::Pending);

    let outcome = session.complete_build(ticket, Ok(field_with_cell(64, (1, 1), 0.9, [140, 90, 80])));
    assert_eq!(outcome, BuildOutcome::Applied);
    assert_eq!(session.findings(), strings(&["Dot hemorrhage noted"]).as_slice());

    let tip = session.inspect_hotspot(Point::new(15.0, 15.0), VIEW, VIEW).unwrap();
    assert_eq!(tip.label, "Hemorrhage / Microaneurysm");
}

#[test]
fn test_no_tooltip_while_panning() {
    let mut session = ready_session();
    session.zoom_in();
    assert!(session.pan_start(Point::new(100.0, 100.0)));
    assert!(session.pan_move(Point::new(100.0, 100.0)));
    // pan is still zero, so the point would otherwise hit the hot cell at 1.5x
    assert!(session.inspect_hotspot(Point::new(22.0, 22.0), VIEW, VIEW).is_none());

    session.pan_end();
    assert!(session.inspect_hotspot(Point::new(22.0, 22.0), VIEW, VIEW).is_some());
}

#[test]
fn test_pan_and_reset_clear_tooltip() {
    let mut session = ready_session();
    session.zoom_in();
    session.inspect_hotspot(Point::new(22.0, 22.0), VIEW, VIEW);
    assert!(session.tooltip().is_some());

    session.pan_start(Point::ZERO);
    session.pan_move(Point::new(4.0, 4.0));
    assert!(session.tooltip().is_none());
    session.pan_end();

    session.inspect_hotspot(Point::new(26.0, 26.0), VIEW, VIEW);
    assert!(session.tooltip().is_some());
    session.reset_view();
    assert!(session.tooltip().is_none());
    assert_eq!(session.viewport().zoom(), 1.0);
}

#[test]
fn test_pan_is_gated_at_zoom_one() {
    let mut session = ready_session();
    assert!(!session.pan_start(Point::new(5.0, 5.0)));
    assert!(!session.pan_move(Point::new(50.0, 50.0)));
    assert_eq!(session.viewport().pan_offset(), Point::ZERO);
}

#[test]
fn test_clear_forgets_everything() {
    let mut session = ready_session();
    session.clear();
    assert_eq!(*session.status(), HeatmapStatus::NoImage);
    assert!(session.field().is_none());
    assert!(session.current_ticket().is_none());
}
