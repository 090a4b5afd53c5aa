//! Grade Oracle CLI.
//!
//! Verdict text goes to stdout; diagnostics go to stderr through `tracing`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use grade_oracle::conformance::{source_positions, recording_banner, RunState};
use grade_oracle::problems;
use grade_oracle::registry::invoking;
use grade_oracle::{GradingHarness, OracleConfig, OracleError, OracleResult, Policy};

#[derive(Parser)]
#[command(name = "oracle")]
#[command(about = "Grade Oracle - deterministic grading of function implementations", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Golden record file (overrides the configuration)
    #[arg(long, global = true)]
    record: Option<PathBuf>,

    /// Judge by fingerprint only, ignoring the golden record
    #[arg(long, global = true)]
    no_record: bool,

    /// Seed for the case generators
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log engine progress to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every registered problem against a submission
    Verify {
        /// Submission to check
        #[arg(long, default_value = "reference")]
        submission: String,

        /// Source listing used to order the problems by definition
        #[arg(long)]
        source: Option<PathBuf>,
    },

    /// Write the golden record from the reference implementations
    Record,

    /// Search one problem for the shortest case where a submission disagrees
    /// with the reference
    Diff {
        /// Problem name
        problem: String,

        /// Submission to compare
        #[arg(long, default_value = "faulty")]
        submission: String,

        /// Stop at the first discrepancy instead of searching for the shortest
        #[arg(long)]
        first: bool,
    },

    /// List registered problems in evaluation order
    List,

    /// Show version information
    Version,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> OracleResult<OracleConfig> {
    let mut config = match &cli.config {
        Some(path) => OracleConfig::load(path)?,
        None => OracleConfig::default(),
    };
    if let Some(path) = &cli.record {
        config.record_path = path.clone();
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if cli.no_record {
        config.use_record = false;
    }
    config.limits.validate()?;
    Ok(config)
}

fn verify(config: OracleConfig, name: &str, source: Option<&PathBuf>) -> OracleResult<ExitCode> {
    let submission = problems::submission(name)?;
    let mut harness = GradingHarness::open(problems::registration_table(), config)?
        .with_reference(problems::reference());
    if let Some(path) = source {
        let text = std::fs::read_to_string(path).map_err(|e| OracleError::io(path, e))?;
        harness.order_by_source(&source_positions(&text));
    }
    if harness.golden_record().is_none() {
        tracing::info!("no golden record loaded, judging by fingerprint only");
    }

    let batch = harness.check_all_with(&submission, |report| {
        if report.verdict.state() != RunState::NotAttempted {
            println!("{}", report);
        }
    });
    println!("{}", batch.summary());
    Ok(ExitCode::SUCCESS)
}

fn record(config: OracleConfig) -> OracleResult<ExitCode> {
    println!("{}", recording_banner(&config.record_path));
    let path = config.record_path.clone();
    let harness = GradingHarness::new(problems::registration_table(), config);
    let summary = harness.record_all(&problems::reference())?;
    for function in &summary.functions {
        match &function.failure {
            Some((index, failure)) => println!(
                "{}: {} entries, stopped at test case #{}: {}",
                function.name, function.entries, index, failure
            ),
            None => println!("{}: {} entries", function.name, function.entries),
        }
    }
    println!(
        "Recorded {} entries for {} functions in {}.",
        summary.entries,
        summary.functions.len(),
        path.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn diff(config: OracleConfig, problem: &str, name: &str, first: bool) -> OracleResult<ExitCode> {
    let submission = problems::submission(name)?;
    let harness = GradingHarness::new(problems::registration_table(), config);
    let policy = if first {
        Policy::StopAtFirst
    } else {
        Policy::Shortest
    };
    let outcome = harness.diff(problem, &problems::reference(), &submission, policy)?;
    println!("{}", outcome);
    Ok(ExitCode::SUCCESS)
}

fn run(cli: &Cli) -> OracleResult<ExitCode> {
    match &cli.command {
        Some(Commands::Verify { submission, source }) => {
            verify(load_config(cli)?, submission, source.as_ref())
        }
        Some(Commands::Record) => record(load_config(cli)?),
        Some(Commands::Diff {
            problem,
            submission,
            first,
        }) => diff(load_config(cli)?, problem, submission, *first),
        Some(Commands::List) => {
            for problem in problems::registration_table() {
                println!("{}", problem.name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Version) => {
            println!("Grade Oracle v{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("Grade Oracle v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Panics inside graded callables are caught and reported as failures.
    std::panic::set_hook(Box::new(|info| {
        if invoking() {
            tracing::debug!("caught panic: {}", info);
        } else {
            tracing::error!("panic: {}", info);
        }
    }));

    match run(&cli) {
        Ok(code) => code,
        Err(OracleError::ImportFailure { submission, reason }) => {
            tracing::error!(%submission, %reason, "import failed");
            println!("ERROR: Unable to import {}. Exiting...", submission);
            ExitCode::from(1)
        }
        Err(e) => {
            tracing::error!(kind = e.name(), "{}", e);
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
