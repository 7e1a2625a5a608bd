//! ClimaDelv — climate action logger CLI
//!
//! Records eco-actions, estimates their CO2 impact and carbon credits, and
//! keeps a running wallet in a local JSON file.
//!
//! Usage:
//!   climadelv log --activity "Planted 30 trees in school ground" --participants 10 --trees 30
//!   climadelv summary
//!   climadelv history --limit 5
//!   climadelv rules
//!   climadelv --wallet ~/eco/wallet.json --rules my-rules.toml log --activity "Cycled to work"

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use climadelv_contracts::{action::ActionInput, error::ClimaResult};
use climadelv_core::{traits::WalletStore, ActionLogger, DEFAULT_HISTORY_LEN};
use climadelv_estimate::{Formula, KeywordEstimator};
use climadelv_store::{JsonFileStore, DEFAULT_WALLET_FILE};

mod render;

// ── CLI definition ────────────────────────────────────────────────────────────

/// ClimaDelv — log climate actions and track your carbon credits.
#[derive(Parser)]
#[command(
    name = "climadelv",
    about = "Climate action logger with CO2 and carbon credit estimates",
    long_about = "Logs eco-actions, estimates CO2 saved with a keyword rule table,\n\
                  and keeps a running wallet of credits in a local JSON file."
)]
struct Cli {
    /// Wallet file to read and update.
    #[arg(long, global = true, default_value = DEFAULT_WALLET_FILE)]
    wallet: PathBuf,

    /// TOML rule table to use instead of the built-in rules.
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log a new eco-action and save it to the wallet.
    Log {
        /// Describe your eco-action, e.g. "Planted 30 trees in school ground".
        #[arg(long, short)]
        activity: String,
        /// Number of people involved.
        #[arg(long, short, default_value_t = 1)]
        participants: u32,
        /// Number of trees planted.
        #[arg(long, short, default_value_t = 0)]
        trees: u32,
        /// Location (city, area).
        #[arg(long, short, default_value = "")]
        location: String,
        /// Seed for the estimate of unrecognised activities.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show total actions, CO2 saved, and credits.
    Summary,
    /// Show the most recent actions, newest first.
    History {
        #[arg(long, short = 'n', default_value_t = DEFAULT_HISTORY_LEN)]
        limit: usize,
    },
    /// Print the active estimation rules.
    Rules,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> ClimaResult<()> {
    match cli.command {
        Command::Log {
            activity,
            participants,
            trees,
            location,
            seed,
        } => {
            let estimator = load_estimator(cli.rules.as_deref())?;
            let mut logger = open_logger(estimator, &cli.wallet)?;
            let input = ActionInput::new(activity, participants, trees).with_location(location);
            let mut rng: Box<dyn RngCore> = match seed {
                Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
                None => Box::new(StdRng::from_entropy()),
            };

            let outcome = logger.submit(&input, rng.as_mut());
            if logger.is_dirty() {
                println!(
                    "The action was estimated but the wallet at '{}' was NOT updated.",
                    cli.wallet.display()
                );
            }
            let outcome = outcome?;
            println!("Saved! You earned {} carbon credits!", outcome.credits);
            println!("Tip: {}", outcome.tip);
            println!();
            render::print_summary(&logger.summary());
        }
        Command::Summary => {
            let wallet = JsonFileStore::new(&cli.wallet).load()?;
            render::print_summary(&wallet.summary());
        }
        Command::History { limit } => {
            let wallet = JsonFileStore::new(&cli.wallet).load()?;
            let recent: Vec<_> = wallet.recent(limit).collect();
            render::print_history(&recent);
        }
        Command::Rules => print_rules(&load_estimator(cli.rules.as_deref())?),
    }

    Ok(())
}

/// Only commands that estimate read the rule table; a broken `--rules` file
/// never blocks `summary` or `history`.
fn load_estimator(rules: Option<&Path>) -> ClimaResult<KeywordEstimator> {
    match rules {
        Some(path) => KeywordEstimator::from_file(path),
        None => KeywordEstimator::builtin(),
    }
}

fn open_logger(estimator: KeywordEstimator, wallet: &Path) -> ClimaResult<ActionLogger> {
    debug!(wallet = %wallet.display(), "opening wallet");
    ActionLogger::open(Box::new(estimator), Box::new(JsonFileStore::new(wallet)))
}

fn print_rules(estimator: &KeywordEstimator) {
    let table = estimator.table();
    println!("Rules (first match wins):");
    for (i, rule) in table.rules.iter().enumerate() {
        let formula = match rule.formula {
            Formula::PerTree { factor } => format!("{} kg per tree", factor),
            Formula::PerParticipant { factor } => format!("{} kg per participant", factor),
        };
        println!("  [{}] {:<16} keyword '{}' -> {}", i + 1, rule.id, rule.keyword, formula);
    }
    println!(
        "  otherwise        random {}..={} kg",
        table.fallback.min, table.fallback.max
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
