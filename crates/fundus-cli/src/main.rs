mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fundus", about = "Saliency heatmaps for retinal fundus photographs")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and saliency statistics
    Info(commands::info::InfoArgs),
    /// Render the heat image, overlay and flattened export
    Heatmap(commands::heatmap::HeatmapArgs),
    /// Report the hotspot label under a view position
    Inspect(commands::inspect::InspectArgs),
    /// Manage the local analysis history
    History(commands::history::HistoryArgs),
    /// Print or save the default heatmap config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Heatmap(args) => commands::heatmap::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::History(args) => commands::history::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
