//! Chronicler CLI — ingest legacy history exports into a world graph.
//!
//! Usage:
//!   chronicler ingest <legends.xml> [--supplement <legends_plus.xml>] [--json]

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "chronicler",
    version,
    about = "Historical world-graph ingestion engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest an export pair and print a summary of the built graph
    Ingest {
        /// Path to the primary export
        primary: PathBuf,
        /// Path to the optional supplementary export
        #[arg(long)]
        supplement: Option<PathBuf>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        /// Also print every diagnostic collected during ingestion
        #[arg(long)]
        diagnostics: bool,
    },
}

#[derive(Serialize)]
struct Summary<'a> {
    name: &'a str,
    alternative_name: &'a str,
    figures: usize,
    sites: usize,
    entities: usize,
    artifacts: usize,
    events: usize,
    collections: usize,
    eras: usize,
    diagnostics: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Ingest {
            primary,
            supplement,
            json,
            diagnostics,
        } => {
            let world = match chronicler::ingest(&primary, supplement.as_deref()).await {
                Ok(world) => world,
                Err(error) => {
                    eprintln!("Error: {error}");
                    return ExitCode::FAILURE;
                }
            };

            let summary = Summary {
                name: &world.name,
                alternative_name: &world.alternative_name,
                figures: world.figures.len(),
                sites: world.sites.len(),
                entities: world.entities.len(),
                artifacts: world.artifacts.len(),
                events: world.events.len(),
                collections: world.collections.len(),
                eras: world.eras.len(),
                diagnostics: world.diagnostics.len(),
            };

            if json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(error) => {
                        eprintln!("Error: {error}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{} ({})", summary.name, summary.alternative_name);
                println!("  figures:      {}", summary.figures);
                println!("  sites:        {}", summary.sites);
                println!("  entities:     {}", summary.entities);
                println!("  artifacts:    {}", summary.artifacts);
                println!("  events:       {}", summary.events);
                println!("  collections:  {}", summary.collections);
                println!("  eras:         {}", summary.eras);
                println!("  diagnostics:  {}", summary.diagnostics);
            }

            if diagnostics {
                for entry in world.diagnostics.entries() {
                    match &entry.detail {
                        Some(detail) => println!("! {} ({detail})", entry.message),
                        None => println!("! {}", entry.message),
                    }
                }
            }

            ExitCode::SUCCESS
        }
    }
}
