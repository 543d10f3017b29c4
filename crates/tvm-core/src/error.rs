//! Error types for TVM commands.

use thiserror::Error;
use tvm_math::MathError;

/// A specialized Result type for TVM commands.
pub type TvmResult<T> = Result<T, TvmError>;

/// Errors raised while parsing or executing a single command.
///
/// The `Display` text of each variant is the exact diagnostic printed after
/// the `line <N>: ` prefix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TvmError {
    /// Unknown command word, wrong operand count or unparseable number.
    #[error("invalid command")]
    InvalidCommand,

    /// `set`/`compute` target is not one of `n`, `i`, `PV`, `PMT`, `FV`.
    #[error("invalid variable name")]
    UnknownVariable,

    /// The interest rate is not strictly positive where it has to be.
    #[error("i must be positive")]
    Domain,

    /// `set n` was given a non-positive or non-integral value.
    #[error("n must be a positive integer")]
    Range,

    /// Root finding failed, or a closed form has a zero denominator.
    ///
    /// Carries the root finder's diagnosis when there is one.
    #[error("solver did not converge")]
    Convergence(Option<MathError>),
}

impl TvmError {
    /// Convergence failure without an underlying solver error.
    #[must_use]
    pub fn convergence() -> Self {
        Self::Convergence(None)
    }

    /// Whether this error came out of the numeric layer.
    #[must_use]
    pub fn is_convergence(&self) -> bool {
        matches!(self, Self::Convergence(_))
    }
}

impl From<MathError> for TvmError {
    fn from(err: MathError) -> Self {
        Self::Convergence(Some(err))
    }
}

/// A command error tagged with the 1-based input line it occurred on.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("line {line}: {source}")]
pub struct LineError {
    /// 1-based line number, counting blank lines.
    pub line: usize,
    /// The command error.
    pub source: TvmError,
}

impl LineError {
    /// Creates a new line error.
    #[must_use]
    pub fn new(line: usize, source: TvmError) -> Self {
        Self { line, source }
    }
}
