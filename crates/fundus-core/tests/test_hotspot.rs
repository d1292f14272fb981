mod common;

use fundus_core::heatmap::GridCell;
use fundus_core::interact::{classify, inspect, HotspotLabel, Point, Tooltip};

use common::{field_with_cell, strings};

#[test]
fn test_threshold_is_strict() {
    let cell = GridCell::new(10, 12);
    let at = field_with_cell(64, (10, 12), 0.6, [220, 210, 200]);
    assert!(inspect(cell, &at, &[]).is_none());

    let above = field_with_cell(64, (10, 12), 0.61, [220, 210, 200]);
    let hotspot = inspect(cell, &above, &[]).unwrap();
    assert_eq!(hotspot.cell, cell);
    assert_eq!(hotspot.color, [220, 210, 200]);
    assert!((hotspot.intensity - 0.61).abs() < 1e-6);
}

#[test]
fn test_cold_neighbors_have_no_hotspot() {
    let field = field_with_cell(64, (3, 3), 0.95, [220, 210, 200]);
    assert!(inspect(GridCell::new(4, 3), &field, &[]).is_none());
    assert!(inspect(GridCell::new(3, 3), &field, &[]).is_some());
}

#[test]
fn test_outside_grid_has_no_hotspot() {
    let field = field_with_cell(8, (7, 7), 1.0, [220, 210, 200]);
    assert!(inspect(GridCell::new(8, 0), &field, &[]).is_none());
    assert!(inspect(GridCell::new(0, 8), &field, &[]).is_none());
}

#[test]
fn test_bright_cell_with_exudate_finding() {
    let field = field_with_cell(64, (20, 20), 0.9, [220, 210, 200]);
    let hotspot = inspect(GridCell::new(20, 20), &field, &strings(&["Hard exudates present"])).unwrap();
    assert_eq!(hotspot.label, HotspotLabel::HardExudate);
    assert_eq!(hotspot.label.to_string(), "Hard Exudate / CWS");
}

#[test]
fn test_bright_cell_without_exudate_finding() {
    let field = field_with_cell(64, (20, 20), 0.9, [220, 210, 200]);
    let hotspot = inspect(GridCell::new(20, 20), &field, &strings(&["No abnormalities"])).unwrap();
    assert_eq!(hotspot.label, HotspotLabel::BrightLesion);
    assert_eq!(hotspot.label.to_string(), "Optic Disc / Bright Lesion");
}

#[test]
fn test_dark_red_cell_with_hemorrhage_finding() {
    let field = field_with_cell(64, (5, 40), 0.8, [140, 90, 80]);
    let hotspot = inspect(GridCell::new(5, 40), &field, &strings(&["Dot hemorrhage noted"])).unwrap();
    assert_eq!(hotspot.label, HotspotLabel::Hemorrhage);
    assert_eq!(hotspot.label.to_string(), "Hemorrhage / Microaneurysm");
}

#[test]
fn test_dark_red_cell_without_findings() {
    let field = field_with_cell(64, (5, 40), 0.8, [140, 90, 80]);
    let hotspot = inspect(GridCell::new(5, 40), &field, &[]).unwrap();
    assert_eq!(hotspot.label, HotspotLabel::VascularAnomaly);
    assert_eq!(hotspot.label.to_string(), "Vascular Anomaly");
}

#[test]
fn test_other_hot_cells_get_generic_label() {
    // neither bright nor red-dominant
    assert_eq!(classify([60, 120, 90], &[]), HotspotLabel::HighAttention);
    // red-dominant but too bright for the dark-lesion rule
    assert_eq!(classify([250, 150, 140], &[]), HotspotLabel::HighAttention);
    assert_eq!(
        HotspotLabel::HighAttention.to_string(),
        "High Attention Region"
    );
}

#[test]
fn test_findings_only_refine_matching_branch() {
    // an exudate finding does not affect a dark red cell
    assert_eq!(
        classify([140, 90, 80], &strings(&["Hard exudates present"])),
        HotspotLabel::VascularAnomaly
    );
    // matching is case-insensitive
    assert_eq!(
        classify([220, 210, 200], &strings(&["EXUDATE cluster"])),
        HotspotLabel::HardExudate
    );
}

#[test]
fn test_tooltip_carries_label_and_position() {
    let field = field_with_cell(64, (1, 1), 1.0, [140, 90, 80]);
    let hotspot = inspect(GridCell::new(1, 1), &field, &[]).unwrap();
    let tip = Tooltip::at(Point::new(12.0, 15.0), &hotspot);
    assert!(tip.visible);
    assert_eq!(tip.position, Point::new(12.0, 15.0));
    assert_eq!(tip.label, "Vascular Anomaly");
}
