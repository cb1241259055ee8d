mod args;
mod commands;
pub mod defaults;
mod printing;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{info, Level};

use args::{AnalyzeArgs, InputArgs};
use commands::{analyze, validate};

/// divstat: population genetics statistics for sequence alignments
///
/// Computes nucleotide diversity, Watterson's estimator, Tajima's D, Fu & Li's
/// D* and F* and allele partition statistics, for whole alignments, every
/// pair of sequences, or sliding windows.
#[derive(Parser, Debug)]
#[command(name = "divstat")]
#[command(author, version, about = "Population genetics statistics for sequence alignments", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute statistics for one or more alignments.
    ///
    /// By default the whole alignment is summarised. Use --pairwise for a
    /// diversity matrix and --window for sliding-window values.
    Analyze(Box<AnalyzeArgs>),

    /// Check that alignments load and report their dimensions.
    Validate(InputArgs),
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    info!(args = ?std::env::args().collect::<Vec<_>>(), "invocation");

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Analyze(args) => {
            analyze::analyze_alignments(&args)?;
        }
        Commands::Validate(args) => {
            validate::validate_alignments(&args)?;
        }
    }

    Ok(())
}
