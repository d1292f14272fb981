use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{FundusError, Result};

use super::types::{AnalysisReport, PatientDetails};

/// One past analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalResult {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub image_path: PathBuf,
    pub report: AnalysisReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<PatientDetails>,
}

/// Local history list, newest first, persisted as one JSON array.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoricalResult>,
}

impl HistoryStore {
    /// Open the store at `path`. A missing file is an empty history.
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            if contents.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| {
                    FundusError::History(format!("{} is not a valid history file: {e}", path.display()))
                })?
            }
        } else {
            Vec::new()
        };
        debug!(path = %path.display(), count = entries.len(), "History opened");
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[HistoricalResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&HistoricalResult> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Prepend a new entry and persist the list.
    pub fn record(
        &mut self,
        image_path: &Path,
        report: AnalysisReport,
        patient: Option<PatientDetails>,
    ) -> Result<HistoricalResult> {
        let timestamp = now_millis();
        let entry = HistoricalResult {
            id: self.fresh_id(timestamp),
            timestamp,
            image_path: image_path.to_path_buf(),
            report,
            patient,
        };
        self.entries.insert(0, entry.clone());
        self.save()?;
        info!(id = %entry.id, "History entry recorded");
        Ok(entry)
    }

    /// Remove an entry by id. Returns whether it existed.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Six base-36 characters derived from the timestamp, bumped until unique.
    fn fresh_id(&self, timestamp: u64) -> String {
        let mut seed = timestamp;
        loop {
            let id = base36(seed % 36u64.pow(6), 6);
            if self.find(&id).is_none() {
                return id;
            }
            seed = seed.wrapping_add(1);
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn base36(mut value: u64, width: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = vec![b'0'; width];
    for slot in out.iter_mut().rev() {
        *slot = DIGITS[(value % 36) as usize];
        value /= 36;
    }
    String::from_utf8_lossy(&out).into_owned()
}
