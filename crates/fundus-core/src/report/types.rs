use serde::{Deserialize, Serialize};

/// Diabetic retinopathy grade reported by the diagnostic stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrSeverity {
    #[default]
    #[serde(rename = "No DR")]
    None,
    Mild,
    Moderate,
    Severe,
    Proliferative,
}

impl std::fmt::Display for DrSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "No DR"),
            Self::Mild => write!(f, "Mild"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Severe => write!(f, "Severe"),
            Self::Proliferative => write!(f, "Proliferative"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicalMetrics {
    /// Free text, e.g. "5-10".
    pub microaneurysms_count: String,
    pub hemorrhage_risk: f32,
    pub exudate_density: f32,
    pub macular_edema_risk: f32,
}

/// Diagnostic report supplied by the external analysis stage.
///
/// Only `key_findings` influence the heatmap (hotspot wording).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisReport {
    pub detection: String,
    pub severity: DrSeverity,
    pub key_findings: Vec<String>,
    pub recommendation: String,
    pub detailed_pathology: String,
    pub confidence_score: f32,
    pub severity_index: f32,
    pub health_score: f32,
    pub progression_risk: f32,
    pub clinical_metrics: ClinicalMetrics,
}

impl AnalysisReport {
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientDetails {
    pub name: String,
    pub id: String,
    pub age: String,
    pub gender: String,
    pub scan_id: String,
}
