use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use fundus_core::report::{AnalysisReport, HistoricalResult, HistoryStore, PatientDetails};
use tracing::debug;

#[derive(Args)]
pub struct HistoryArgs {
    /// History file (JSON)
    #[arg(long, default_value = "fundus_history.json")]
    pub store: PathBuf,

    #[command(subcommand)]
    pub action: HistoryAction,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List past analyses, newest first
    List,
    /// Show one analysis in full
    Show {
        id: String,
    },
    /// Record an analysis of IMAGE from a report JSON file
    Add {
        image: PathBuf,
        report: PathBuf,

        /// Patient name
        #[arg(long)]
        patient_name: Option<String>,

        /// Patient identifier
        #[arg(long)]
        patient_id: Option<String>,
    },
    /// Delete one analysis
    Remove {
        id: String,
    },
    /// Delete every analysis
    Clear,
}

pub fn run(args: &HistoryArgs) -> Result<()> {
    let mut store = HistoryStore::open(&args.store)
        .with_context(|| format!("Failed to open history {}", args.store.display()))?;

    match &args.action {
        HistoryAction::List => {
            if store.is_empty() {
                println!("No analyses recorded in {}", args.store.display());
            }
            for entry in store.entries() {
                println!(
                    "{}  {:<14}  {:>5.1}%  {}",
                    entry.id,
                    entry.report.severity.to_string(),
                    entry.report.confidence_score * 100.0,
                    entry.image_path.display()
                );
            }
        }
        HistoryAction::Show { id } => {
            let Some(entry) = store.find(id) else {
                bail!("No analysis with id {id}");
            };
            print_entry(entry);
        }
        HistoryAction::Add {
            image,
            report,
            patient_name,
            patient_id,
        } => {
            let json = std::fs::read_to_string(report)
                .with_context(|| format!("Failed to read report {}", report.display()))?;
            let parsed = AnalysisReport::from_json(&json)
                .with_context(|| format!("Invalid report {}", report.display()))?;
            let patient = if patient_name.is_some() || patient_id.is_some() {
                Some(PatientDetails {
                    name: patient_name.clone().unwrap_or_default(),
                    id: patient_id.clone().unwrap_or_default(),
                    ..Default::default()
                })
            } else {
                None
            };
            let entry = store.record(image, parsed, patient)?;
            println!("Recorded {} ({})", entry.id, entry.report.severity);
        }
        HistoryAction::Remove { id } => {
            if store.remove(id)? {
                println!("Removed {id}");
            } else {
                bail!("No analysis with id {id}");
            }
        }
        HistoryAction::Clear => {
            let count = store.len();
            debug!(count, store = %args.store.display(), "Clearing history");
            store.clear()?;
            println!("Cleared {count} analyses");
        }
    }

    Ok(())
}

fn print_entry(entry: &HistoricalResult) {
    let r = &entry.report;
    println!("Id:          {}", entry.id);
    println!("Timestamp:   {} ms", entry.timestamp);
    println!("Image:       {}", entry.image_path.display());
    if let Some(ref p) = entry.patient {
        println!("Patient:     {} ({})", p.name, p.id);
    }
    println!("Detection:   {}", r.detection);
    println!("Severity:    {}", r.severity);
    println!("Confidence:  {:.1}%", r.confidence_score * 100.0);
    println!("Health:      {:.1}", r.health_score);
    if !r.key_findings.is_empty() {
        println!("Findings:");
        for f in &r.key_findings {
            println!("  - {f}");
        }
    }
    if !r.recommendation.is_empty() {
        println!("Advice:      {}", r.recommendation);
    }
}
