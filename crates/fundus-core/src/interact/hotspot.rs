//! Hover labels for hot saliency cells.
//!
//! The labels are a color/brightness heuristic, not a classifier. Report
//! findings are matched by case-insensitive substring only to choose more
//! specific wording; nothing here verifies that a lesion is present.

use crate::consts::{
    BRIGHT_LESION_MIN_BRIGHTNESS, DARK_LESION_MAX_BRIGHTNESS, HOTSPOT_THRESHOLD,
    RED_DOMINANCE_RATIO,
};
use crate::heatmap::saliency::SaliencyField;
use crate::heatmap::scale::GridCell;

use super::viewport::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HotspotLabel {
    HardExudate,
    BrightLesion,
    Hemorrhage,
    VascularAnomaly,
    HighAttention,
}

impl std::fmt::Display for HotspotLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HardExudate => write!(f, "Hard Exudate / CWS"),
            Self::BrightLesion => write!(f, "Optic Disc / Bright Lesion"),
            Self::Hemorrhage => write!(f, "Hemorrhage / Microaneurysm"),
            Self::VascularAnomaly => write!(f, "Vascular Anomaly"),
            Self::HighAttention => write!(f, "High Attention Region"),
        }
    }
}

/// A grid cell above the hotspot threshold, with its label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hotspot {
    pub cell: GridCell,
    pub intensity: f32,
    pub color: [u8; 3],
    pub label: HotspotLabel,
}

/// Hover label shown next to the pointer, in screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub position: Point,
    pub label: String,
    pub visible: bool,
}

impl Tooltip {
    pub fn at(position: Point, hotspot: &Hotspot) -> Self {
        Self {
            position,
            label: hotspot.label.to_string(),
            visible: true,
        }
    }
}

/// Label the cell if its intensity is strictly above the hotspot threshold.
/// Cells outside the grid yield `None`.
pub fn inspect(cell: GridCell, field: &SaliencyField, findings: &[String]) -> Option<Hotspot> {
    let intensity = field.intensity_at(cell)?;
    if intensity <= HOTSPOT_THRESHOLD {
        return None;
    }
    let color = field.color_at(cell)?;
    Some(Hotspot {
        cell,
        intensity,
        color,
        label: classify(color, findings),
    })
}

/// Pick a label from a cell's sampled color and the report findings.
pub fn classify(color: [u8; 3], findings: &[String]) -> HotspotLabel {
    let [r, g, b] = color.map(f32::from);
    let brightness = (r + g + b) / 3.0;

    if brightness > BRIGHT_LESION_MIN_BRIGHTNESS {
        if findings_mention(findings, "exudate") {
            HotspotLabel::HardExudate
        } else {
            HotspotLabel::BrightLesion
        }
    } else if r > RED_DOMINANCE_RATIO * g
        && r > RED_DOMINANCE_RATIO * b
        && brightness < DARK_LESION_MAX_BRIGHTNESS
    {
        if findings_mention(findings, "hemorrhage") {
            HotspotLabel::Hemorrhage
        } else {
            HotspotLabel::VascularAnomaly
        }
    } else {
        HotspotLabel::HighAttention
    }
}

/// Case-insensitive substring match of `needle` against any finding.
pub fn findings_mention(findings: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    findings
        .iter()
        .any(|f| f.to_lowercase().contains(&needle))
}
