mod analyzer;
mod collection;
mod extract;
mod input;
mod output;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use analyzer::rank::{LexicalScorer, RelevanceScorer};

#[derive(Parser)]
#[command(
    name = "persona_digest",
    about = "Persona-driven section digest for document collections"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every Collection_* directory under the root
    Run {
        /// Root directory scanned for collection directories
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
        /// Max collections to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Disable the relevance scorer and rank by encounter order
        #[arg(long)]
        no_scorer: bool,
    },
    /// Process a single collection directory
    Process {
        /// Collection directory containing challenge1b_input.json and PDFs/
        dir: PathBuf,
        /// Disable the relevance scorer and rank by encounter order
        #[arg(long)]
        no_scorer: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            root,
            limit,
            no_scorer,
        } => {
            let scorer = make_scorer(no_scorer);
            let dirs = collection::find_collections(&root)?;
            if dirs.is_empty() {
                println!("No collection directories found under {}.", root.display());
                return Ok(());
            }
            let take = limit.unwrap_or(dirs.len());
            for dir in dirs.iter().take(take) {
                info!("processing {}", dir.display());
                // One bad collection never stops the rest of the batch.
                match collection::process_collection(dir, scorer.as_deref()) {
                    Ok(counts) => counts.print(),
                    Err(e) => warn!("collection {} failed: {}", dir.display(), e),
                }
            }
            Ok(())
        }
        Commands::Process { dir, no_scorer } => {
            let scorer = make_scorer(no_scorer);
            let counts = collection::process_collection(&dir, scorer.as_deref())?;
            counts.print();
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn make_scorer(disabled: bool) -> Option<Box<dyn RelevanceScorer>> {
    if disabled {
        warn!("relevance scorer disabled, ranking by encounter order");
        return None;
    }
    Some(Box::new(LexicalScorer::new()))
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
