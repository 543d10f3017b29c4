//! Line-by-line driver.
//!
//! A [`Session`] feeds input lines to a [`Calculator`], writes computed
//! values to the output and diagnostics (`line <N>: <message>`) to the error
//! stream. In [`FailurePolicy::Strict`] mode the first failing line ends the
//! session; in [`FailurePolicy::KeepGoing`] mode every failure is reported and
//! reading continues.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, info};
use tvm_math::solvers::SolverConfig;

use crate::calculator::Calculator;
use crate::error::LineError;
use crate::input::{LineLimit, LineReader};

/// What to do after a command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing line.
    #[default]
    Strict,
    /// Report the failure and continue with the next line.
    KeepGoing,
}

/// Session settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    /// Behavior after a failing line.
    pub failure_policy: FailurePolicy,
    /// Input line length policy.
    pub line_limit: LineLimit,
    /// Root-finder settings for `compute n` and `compute i`.
    pub solver: SolverConfig,
}

impl SessionConfig {
    /// Sets the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Sets the line length policy.
    #[must_use]
    pub fn with_line_limit(mut self, line_limit: LineLimit) -> Self {
        self.line_limit = line_limit;
        self
    }

    /// Sets the root-finder configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// Failures that end a session regardless of the failure policy.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading the input failed.
    #[error("Error reading input")]
    Read(#[source] io::Error),

    /// Writing results or diagnostics failed.
    #[error("Error writing output")]
    Write(#[source] io::Error),
}

/// Tally of a finished session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    /// Lines read, blank lines included.
    pub lines: usize,
    /// Lines that failed.
    pub failures: Vec<LineError>,
}

impl SessionSummary {
    /// True when no line failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives a calculator over a stream of command lines.
#[derive(Debug)]
pub struct Session<R> {
    reader: LineReader<R>,
    calculator: Calculator,
    policy: FailurePolicy,
}

impl<R: BufRead> Session<R> {
    /// Creates a session over `input`.
    pub fn new(input: R, config: SessionConfig) -> Self {
        Self {
            reader: LineReader::new(input, config.line_limit),
            calculator: Calculator::new().with_solver_config(config.solver),
            policy: config.failure_policy,
        }
    }

    /// The calculator, for inspecting state after a run.
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Processes lines until end of input, or until the first failure in
    /// strict mode.
    pub fn run<W: Write, E: Write>(
        &mut self,
        out: &mut W,
        diagnostics: &mut E,
    ) -> Result<SessionSummary, SessionError> {
        let mut summary = SessionSummary::default();

        while let Some(line) = self.reader.next_line().map_err(SessionError::Read)? {
            summary.lines += 1;
            match self.calculator.process_line(&line) {
                Ok(Some(output)) => writeln!(out, "{output}").map_err(SessionError::Write)?,
                Ok(None) => {}
                Err(source) => {
                    let err = LineError::new(summary.lines, source);
                    debug!(line = err.line, cause = ?err.source, "command failed");
                    out.flush().map_err(SessionError::Write)?;
                    writeln!(diagnostics, "{err}").map_err(SessionError::Write)?;
                    summary.failures.push(err);
                    if self.policy == FailurePolicy::Strict {
                        break;
                    }
                }
            }
        }

        out.flush().map_err(SessionError::Write)?;
        info!(
            lines = summary.lines,
            failures = summary.failures.len(),
            "session finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TvmError;
    use std::io::Cursor;

    fn run(input: &str, config: SessionConfig) -> (SessionSummary, String, String) {
        let mut session = Session::new(Cursor::new(input.as_bytes().to_vec()), config);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let summary = session.run(&mut out, &mut err).unwrap();
        (
            summary,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_future_value_session() {
        let (summary, out, err) = run(
            "set n 360\nset i 0.005\nset PV 100000\nset PMT 0\ncompute FV\n",
            SessionConfig::default(),
        );
        assert!(summary.is_success());
        assert_eq!(summary.lines, 5);
        assert_eq!(out, "FV = -602257.52\n");
        assert_eq!(err, "");
    }

    #[test]
    fn test_state_survives_run() {
        let mut session = Session::new(
            Cursor::new(b"set n 0x10\nset i 0.05\nset PMT -100\ncompute PV\nset n 0\n".to_vec()),
            SessionConfig::default(),
        );
        let summary = session.run(&mut Vec::<u8>::new(), &mut Vec::<u8>::new()).unwrap();
        assert_eq!(summary.failures.len(), 1);

        let state = session.calculator().state();
        assert_eq!(state.n, 16.0);
        assert_eq!(state.i, 0.05);
        assert_eq!(state.pmt, -100.0);
        assert!((state.pv - 1083.77).abs() < 0.01);
    }

    #[test]
    fn test_strict_stops_at_first_error() {
        let (summary, out, err) = run(
            "set n 10\nset n abc\ncompute XYZ\n",
            SessionConfig::default(),
        );
        assert_eq!(summary.lines, 2);
        assert_eq!(summary.failures, [LineError::new(2, TvmError::InvalidCommand)]);
        assert_eq!(out, "");
        assert_eq!(err, "line 2: invalid command\n");
    }

    #[test]
    fn test_blank_lines_are_counted() {
        let (_, out, err) = run(
            "set i 0.01\n\n   \ncompute XYZ\n",
            SessionConfig::default(),
        );
        assert_eq!(out, "");
        assert_eq!(err, "line 4: invalid variable name\n");
    }

    #[test]
    fn test_output_before_failure_is_kept() {
        let (_, out, err) = run(
            "set n 10\nset i 0.05\nset PMT -100\ncompute PV\nclear\ncompute PV\n",
            SessionConfig::default(),
        );
        assert_eq!(out, "PV = 772.17\n");
        assert_eq!(err, "line 6: i must be positive\n");
    }

    #[test]
    fn test_keep_going_reports_every_error() {
        let config = SessionConfig::default().with_failure_policy(FailurePolicy::KeepGoing);
        let (summary, out, err) = run(
            "set n 2.5\nset i 0\nset n 10\nset i 0.05\nset PMT -100\ncompute PV\nbogus\n",
            config,
        );
        assert_eq!(summary.lines, 7);
        assert_eq!(summary.failures.len(), 3);
        assert_eq!(out, "PV = 772.17\n");
        assert_eq!(
            err,
            "line 1: n must be a positive integer\nline 2: i must be positive\nline 7: invalid command\n"
        );
    }

    #[test]
    fn test_compat_buffer_numbers_split_lines() {
        // The 44-byte line is read as "set PV <32 digits>" and then "11111".
        let config = SessionConfig::default().with_line_limit(LineLimit::COMPAT);
        let input = format!("set PV {}\n", "1".repeat(37));
        let (summary, _, err) = run(&input, config);
        assert_eq!(summary.lines, 2);
        assert_eq!(err, "line 2: invalid command\n");
    }

    #[test]
    fn test_unbounded_accepts_long_lines() {
        let input = format!("set PV {}\n", "1".repeat(37));
        let (summary, _, err) = run(&input, SessionConfig::default());
        assert!(summary.is_success());
        assert_eq!(summary.lines, 1);
        assert_eq!(err, "");
    }

    #[test]
    fn test_solver_config_is_used() {
        let config =
            SessionConfig::default().with_solver(SolverConfig::default().with_max_iterations(1));
        let (_, _, err) = run(
            "set n 360\nset PV 100000\nset PMT -599.55\ncompute i\n",
            config,
        );
        assert_eq!(err, "line 4: solver did not converge\n");
    }

    #[test]
    fn test_read_error() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "boom"))
            }
        }

        let mut session = Session::new(io::BufReader::new(Broken), SessionConfig::default());
        let err = session.run(&mut Vec::<u8>::new(), &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, SessionError::Read(_)));
        assert_eq!(err.to_string(), "Error reading input");
    }
}
