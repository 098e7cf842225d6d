use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use commander_deck_analyzer::dataset::{self, DatasetKind, FetchOutcome, Fetcher};
use commander_deck_analyzer::{config, parse_decklist, AnalysisSource, DeckAnalysis, DeckAnalyzer};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// deck-analyzer - Commander decklist statistics
#[derive(Parser)]
#[command(name = "deck-analyzer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a decklist file (or stdin)
    Analyze {
        /// Decklist file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Trimmed card dataset (default: $DECK_ANALYZER_DATASET or data/mtgjson/atomic-trimmed.json)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Print the raw analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download an MTGJSON dataset with checksum verification
    Fetch {
        /// Dataset to download: atomic or all-printings
        #[arg(long, default_value = "atomic")]
        dataset: DatasetKind,

        /// Directory to download into
        #[arg(long, default_value = config::DEFAULT_DATA_DIR)]
        dir: PathBuf,

        /// Download even if the local copy matches the checksum
        #[arg(long)]
        force: bool,
    },

    /// Trim AtomicCards.json into the dataset the analyzer reads
    Trim {
        /// Path to AtomicCards.json (optionally .gz)
        #[arg(long, default_value = "data/mtgjson/AtomicCards.json")]
        input: PathBuf,

        /// Output path for the trimmed JSON
        #[arg(long, default_value = config::DEFAULT_DATASET_PATH)]
        output: PathBuf,

        /// Keep only Commander-legal cards
        #[arg(long)]
        commander_only: bool,
    },

    /// Run a quick self-check of parsing and totals
    Validate,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            dataset,
            json,
        } => cmd_analyze(file.as_deref(), dataset, json),
        Commands::Fetch {
            dataset,
            dir,
            force,
        } => cmd_fetch(dataset, &dir, force),
        Commands::Trim {
            input,
            output,
            commander_only,
        } => cmd_trim(&input, &output, commander_only),
        Commands::Validate => cmd_validate(),
    }
}

fn read_decklist(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read decklist {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read decklist from stdin")?;
            Ok(text)
        }
    }
}

fn cmd_analyze(file: Option<&Path>, dataset: Option<PathBuf>, json: bool) -> Result<()> {
    let text = read_decklist(file)?;
    if text.trim().is_empty() {
        bail!("Decklist is required.");
    }

    let mut builder = DeckAnalyzer::builder();
    if let Some(path) = dataset {
        builder = builder.dataset_path(path);
    }
    let analysis = builder.build().analyze(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_summary(&analysis);
    }
    Ok(())
}

fn print_summary(analysis: &DeckAnalysis) {
    println!("Source:      {}", analysis.source);
    println!("Total cards: {}", analysis.total_cards);
    match analysis.avg_cmc {
        Some(avg) => println!("Average CMC: {:.2}", avg),
        None => println!("Average CMC: n/a"),
    }
    if analysis.colors.is_empty() {
        println!("Colors:      colorless");
    } else {
        println!("Colors:      {}", analysis.colors.join(""));
    }
    println!(
        "Commander:   {}",
        analysis.commander.as_deref().unwrap_or("none detected")
    );

    let unresolved = analysis.unresolved();
    if !unresolved.is_empty() && analysis.source == AnalysisSource::FullIndex {
        tracing::warn!("{} card(s) not recognized: {}", unresolved.len(), unresolved.join(", "));
    }
}

fn cmd_fetch(kind: DatasetKind, dir: &Path, force: bool) -> Result<()> {
    let outcome = Fetcher::default().fetch(kind, dir, force)?;
    match outcome {
        FetchOutcome::UpToDate(path) => {
            println!("{} already up to date (sha256 match).", path.display())
        }
        FetchOutcome::Downloaded(path) => println!("Downloaded and verified {}", path.display()),
    }
    Ok(())
}

fn cmd_trim(input: &Path, output: &Path, commander_only: bool) -> Result<()> {
    let summary = dataset::trim_atomic(input, output, commander_only)?;
    println!("Trimmed {} cards -> {}", summary.kept, summary.output.display());
    Ok(())
}

const VALIDATION_DECKLIST: &str = "1 Atraxa, Praetors' Voice
1 Sol Ring
1 Arcane Signet
1 Cultivate
1 Swords to Plowshares";

fn cmd_validate() -> Result<()> {
    let parsed = parse_decklist(VALIDATION_DECKLIST);
    if parsed.len() != 5 {
        bail!("Expected 5 parsed lines, got {}", parsed.len());
    }
    if parsed[0].name != "Atraxa, Praetors' Voice" {
        bail!("Unexpected first card name: {}", parsed[0].name);
    }

    let analysis = commander_deck_analyzer::analyze_decklist(VALIDATION_DECKLIST);
    if analysis.total_cards != 5 {
        bail!(
            "Total cards should match parsed counts, got {}",
            analysis.total_cards
        );
    }

    println!("Deck analysis validation passed.");
    Ok(())
}
