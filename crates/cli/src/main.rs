//! Cache simulator CLI.
//!
//! This binary replays a Valgrind memory trace against a set-associative
//! cache and reports hit, miss, and eviction counts. It performs:
//! 1. **Configuration:** Parses `-s`, `-E`, `-b`, `-t` (optionally layered over a JSON `--config` file) and validates them.
//! 2. **Replay:** Streams the trace through the cache, printing each record's outcome with `-v`.
//! 3. **Summary:** Prints `hits:<n> misses:<n> evictions:<n>` and writes `.csim_results`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use csim_core::common::error::{ConfigError, SummaryError, TraceError};
use csim_core::sim::loader;
use csim_core::sim::{NullObserver, VerboseObserver};
use csim_core::{CacheConfig, CacheSim};

/// Prefix of every operator-facing message.
const PROGRAM: &str = "csim";

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator (LRU)",
    after_help = "Examples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 8 -E 2 -b 4 -t traces/yi.trace\n  csim --config cache.json -t traces/dave.trace"
)]
struct Cli {
    /// Print each trace record followed by its hit/miss/eviction outcome.
    #[arg(short, long)]
    verbose: bool,

    /// Number of set index bits (S = 2^s sets).
    #[arg(short = 's', value_name = "num")]
    set_bits: Option<u32>,

    /// Number of lines per set (associativity).
    #[arg(short = 'E', value_name = "num")]
    associativity: Option<usize>,

    /// Number of block offset bits (B = 2^b bytes per block).
    #[arg(short = 'b', value_name = "num")]
    block_bits: Option<u32>,

    /// Valgrind trace file to replay.
    #[arg(short = 't', value_name = "file")]
    trace: Option<PathBuf>,

    /// JSON file supplying any of `s`, `E`, `b`, `t`; command-line flags take precedence.
    #[arg(short = 'c', long = "config", value_name = "file")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Parameters given directly on the command line.
    fn overrides(&self) -> CacheConfig {
        CacheConfig {
            set_bits: self.set_bits,
            associativity: self.associativity,
            block_bits: self.block_bits,
            trace: self.trace.clone(),
        }
    }

    /// Loads the config file, if any, and layers the command-line flags over it.
    fn resolve_config(&self) -> Result<CacheConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => CacheConfig::from_json_file(path)?,
            None => CacheConfig::default(),
        };
        Ok(base.merge(self.overrides()))
    }
}

/// Fatal errors that end the run before a summary is produced.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error("could not write output: {0}")]
    Output(#[from] io::Error),
}

/// How a run that produced a summary ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunStatus {
    /// Every line of the trace was read.
    Completed,
    /// The trace could not be opened; the summary is all zeros.
    TraceUnavailable,
    /// Reading the trace or reporting an outcome failed partway through.
    Interrupted,
}

impl RunStatus {
    /// Process exit status for this outcome.
    const fn exit_code(self) -> u8 {
        match self {
            Self::Completed | Self::TraceUnavailable => 0,
            Self::Interrupted => 1,
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let mut stdout = io::stdout().lock();
    let result = run(&cli, &mut stdout, Path::new("."));
    ExitCode::from(finish(result, &mut stdout))
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Validates the configuration, replays the trace, and reports the summary.
///
/// Verbose record lines and the summary are written to `out`; the result
/// artifact is written into `results_dir`. A trace that cannot be opened is
/// reported but not fatal: the summary is still produced, with every count
/// at zero.
fn run(cli: &Cli, out: &mut dyn Write, results_dir: &Path) -> Result<RunStatus, CliError> {
    let config = cli.resolve_config()?;
    let geometry = config.geometry()?;
    let trace = config.trace_path()?;

    debug!(
        "S:{} E:{} B:{} trace:{}",
        geometry.num_sets(),
        geometry.associativity(),
        geometry.block_bytes(),
        trace.display()
    );

    let mut cache = CacheSim::new(&geometry);
    let replayed = if cli.verbose {
        loader::replay_file(&mut cache, trace, &mut VerboseObserver::new(&mut *out))
    } else {
        loader::replay_file(&mut cache, trace, &mut NullObserver)
    };

    let status = match replayed {
        Ok(report) => {
            if report.malformed > 0 {
                warn!(
                    malformed = report.malformed,
                    "some trace lines were skipped"
                );
            }
            RunStatus::Completed
        }
        Err(err @ TraceError::Open { .. }) => {
            eprintln!("{PROGRAM}: {err}");
            RunStatus::TraceUnavailable
        }
        Err(err) => {
            eprintln!("{PROGRAM}: {err}");
            RunStatus::Interrupted
        }
    };

    let summary = cache.stats().summary();
    let path = summary.write_results(results_dir)?;
    debug!(path = %path.display(), "results written");

    writeln!(out, "{summary}")?;
    out.flush()?;
    Ok(status)
}

/// Turns the result of `run` into a process exit status, reporting any error.
///
/// Configuration errors go to `out` followed by the usage text; every other
/// error goes to stderr.
fn finish(result: Result<RunStatus, CliError>, out: &mut dyn Write) -> u8 {
    match result {
        Ok(status) => status.exit_code(),
        Err(CliError::Config(err)) => {
            if let Err(io_err) = report_config_error(&err, out) {
                warn!(error = %io_err, "could not print usage");
            }
            1
        }
        Err(err) => {
            eprintln!("{PROGRAM}: {err}");
            1
        }
    }
}

/// Prints a configuration error and the usage text.
///
/// An absent or zero parameter is reported with the fixed line
/// `csim: Missing required command line argument`; which parameter it was is
/// only logged.
fn report_config_error(err: &ConfigError, mut out: &mut dyn Write) -> io::Result<()> {
    debug!(error = %err, "invalid configuration");
    match err {
        ConfigError::MissingArgument(_) | ConfigError::ZeroParameter(_) => {
            writeln!(out, "{PROGRAM}: Missing required command line argument")?;
        }
        other => writeln!(out, "{PROGRAM}: {other}")?,
    }
    Cli::command().write_help(&mut out)?;
    out.flush()
}
