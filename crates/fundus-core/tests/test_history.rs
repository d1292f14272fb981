use std::path::Path;

use fundus_core::error::FundusError;
use fundus_core::report::{AnalysisReport, DrSeverity, HistoryStore, PatientDetails};

fn report(severity: DrSeverity, findings: &[&str]) -> AnalysisReport {
    AnalysisReport {
        detection: "Diabetic Retinopathy".into(),
        severity,
        key_findings: findings.iter().map(|s| s.to_string()).collect(),
        confidence_score: 0.87,
        ..Default::default()
    }
}

#[test]
fn test_missing_file_is_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::open(&dir.path().join("history.json")).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn test_record_persists_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("history.json");

    let mut store = HistoryStore::open(&path).unwrap();
    let first = store
        .record(Path::new("a.png"), report(DrSeverity::Mild, &["Microaneurysms"]), None)
        .unwrap();
    let second = store
        .record(
            Path::new("b.png"),
            report(DrSeverity::Severe, &["Dot hemorrhage noted"]),
            Some(PatientDetails {
                name: "Test Patient".into(),
                ..Default::default()
            }),
        )
        .unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(first.id.len(), 6);

    let reopened = HistoryStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.entries()[0].id, second.id);
    assert_eq!(reopened.entries()[1].id, first.id);
    assert_eq!(reopened.entries()[0].report.severity, DrSeverity::Severe);
    assert_eq!(
        reopened.entries()[0].patient.as_ref().map(|p| p.name.as_str()),
        Some("Test Patient")
    );
    assert!(reopened.entries()[1].patient.is_none());
}

#[test]
fn test_find_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let mut store = HistoryStore::open(&path).unwrap();
    let entry = store
        .record(Path::new("scan.jpg"), report(DrSeverity::None, &[]), None)
        .unwrap();

    assert_eq!(store.find(&entry.id).map(|e| e.image_path.clone()), Some("scan.jpg".into()));
    assert!(store.remove(&entry.id).unwrap());
    assert!(!store.remove(&entry.id).unwrap());
    assert!(store.find(&entry.id).is_none());
    assert!(HistoryStore::open(&path).unwrap().is_empty());
}

#[test]
fn test_clear_empties_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let mut store = HistoryStore::open(&path).unwrap();
    for name in ["1.png", "2.png", "3.png"] {
        store
            .record(Path::new(name), report(DrSeverity::Moderate, &[]), None)
            .unwrap();
    }
    assert_eq!(store.len(), 3);
    store.clear().unwrap();
    assert!(HistoryStore::open(&path).unwrap().is_empty());
}

#[test]
fn test_corrupt_file_is_history_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        HistoryStore::open(&path),
        Err(FundusError::History(_))
    ));
}

#[test]
fn test_report_json_uses_camel_case() {
    let json = r#"{
        "detection": "Diabetic Retinopathy",
        "severity": "No DR",
        "keyFindings": ["Hard exudates present"],
        "confidenceScore": 0.91,
        "clinicalMetrics": { "microaneurysmsCount": "5-10", "hemorrhageRisk": 0.2 }
    }"#;
    let report = AnalysisReport::from_json(json).unwrap();
    assert_eq!(report.severity, DrSeverity::None);
    assert_eq!(report.key_findings, vec!["Hard exudates present".to_string()]);
    assert_eq!(report.clinical_metrics.microaneurysms_count, "5-10");
    assert_eq!(report.recommendation, "");

    let out = serde_json::to_string(&report).unwrap();
    assert!(out.contains("\"keyFindings\""));
    assert!(out.contains("\"No DR\""));
}

#[test]
fn test_severity_display() {
    assert_eq!(DrSeverity::None.to_string(), "No DR");
    assert_eq!(DrSeverity::Proliferative.to_string(), "Proliferative");
}

#[test]
fn test_bad_report_json_is_error() {
    assert!(matches!(
        AnalysisReport::from_json("[1, 2, 3]"),
        Err(FundusError::Json(_))
    ));
}
