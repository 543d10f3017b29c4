//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;
use tvm_core::input::LineLimit;
use tvm_core::{FailurePolicy, SessionConfig};

/// TVM - time-value-of-money calculator
///
/// Reads `set VAR VALUE`, `compute VAR` and `clear` commands, one per line,
/// over the variables n, i, PV, PMT and FV.
#[derive(Parser, Debug)]
#[command(name = "tvm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Command file to read instead of standard input ("-" for stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Report every failing line and keep reading
    #[arg(short, long)]
    pub keep_going: bool,

    /// Read input through a fixed buffer of this many bytes (40 matches the
    /// classic calculator); longer lines continue on the next line number
    #[arg(long, value_name = "BYTES", value_parser = clap::value_parser!(u16).range(2..))]
    pub line_buffer: Option<u16>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Session settings selected by the flags.
    pub fn session_config(&self) -> SessionConfig {
        let failure_policy = if self.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::Strict
        };
        let line_limit = self
            .line_buffer
            .map_or(LineLimit::Unbounded, |bytes| LineLimit::Buffer(usize::from(bytes)));

        SessionConfig::default()
            .with_failure_policy(failure_policy)
            .with_line_limit(line_limit)
    }

    /// The input path, unless commands come from standard input.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|path| path.as_os_str() != "-")
    }
}
