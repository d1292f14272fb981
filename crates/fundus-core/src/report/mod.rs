pub mod history;
pub mod types;

pub use history::{HistoricalResult, HistoryStore};
pub use types::{AnalysisReport, ClinicalMetrics, DrSeverity, PatientDetails};
