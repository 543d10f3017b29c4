//! TVM CLI - time-value-of-money calculator.
//!
//! # Usage
//!
//! ```bash
//! # Future value of 100000 after 360 periods at 0.5%
//! printf 'set n 360\nset i 0.005\nset PV 100000\nset PMT 0\ncompute FV\n' | tvm
//!
//! # Run a command file, reporting every bad line
//! tvm --keep-going payments.tvm
//! ```
//!
//! Computed values go to stdout. The first failing line is reported on stderr
//! as `line <N>: <message>` and the process exits with status 1.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tvm_core::{Session, SessionSummary};

mod cli;
mod error;

use cli::Cli;
use error::{CliError, CliResult};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("tvm:  {err}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr and stay silent unless asked for, since stderr also
/// carries the `line <N>:` diagnostics.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "tvm_core=debug,tvm_math=debug"
    } else {
        "off"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<SessionSummary> {
    let input = open_input(cli)?;
    tracing::info!(input = ?cli.input_path(), config = ?cli.session_config(), "starting session");

    let mut session = Session::new(input, cli.session_config());
    let mut stdout = BufWriter::new(io::stdout().lock());
    let mut stderr = io::stderr().lock();

    let summary = session
        .run(&mut stdout, &mut stderr)
        .map_err(CliError::from)?;
    Ok(summary)
}

fn open_input(cli: &Cli) -> CliResult<Box<dyn BufRead>> {
    match cli.input_path() {
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.clone(),
                source,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}
