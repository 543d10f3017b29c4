//! The five calculator variables.

use std::fmt;
use std::str::FromStr;

use crate::error::{TvmError, TvmResult};

/// Name of one of the five TVM variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    /// Number of compounding periods.
    N,
    /// Interest rate per period.
    I,
    /// Present value.
    Pv,
    /// Periodic payment.
    Pmt,
    /// Future value.
    Fv,
}

impl Variable {
    /// All variables in display order.
    pub const ALL: [Variable; 5] = [Self::N, Self::I, Self::Pv, Self::Pmt, Self::Fv];

    /// The name used on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::I => "i",
            Self::Pv => "PV",
            Self::Pmt => "PMT",
            Self::Fv => "FV",
        }
    }

    /// Decimal places used when the variable is printed.
    #[must_use]
    pub fn precision(self) -> usize {
        match self {
            Self::N => 0,
            Self::I => 6,
            Self::Pv | Self::Pmt | Self::Fv => 2,
        }
    }

    /// Checks a value about to be assigned with `set`.
    ///
    /// `n` must be a finite positive whole number and `i` strictly positive;
    /// the monetary variables accept anything, including non-finite values.
    pub fn validate(self, value: f64) -> TvmResult<f64> {
        match self {
            Self::N if !(value > 0.0 && is_whole(value)) => Err(TvmError::Range),
            Self::I if !(value > 0.0) => Err(TvmError::Domain),
            _ => Ok(value),
        }
    }
}

fn is_whole(x: f64) -> bool {
    x.is_finite() && x.floor() == x
}

impl FromStr for Variable {
    type Err = TvmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or(TvmError::UnknownVariable)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current values of the five variables.
///
/// A fresh state, and the state after `clear`, is all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FinancialState {
    /// Number of periods.
    pub n: f64,
    /// Interest rate per period.
    pub i: f64,
    /// Present value.
    pub pv: f64,
    /// Periodic payment.
    pub pmt: f64,
    /// Future value.
    pub fv: f64,
}

impl FinancialState {
    /// Creates a zeroed state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every variable to zero.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Reads a variable.
    #[must_use]
    pub fn get(&self, var: Variable) -> f64 {
        match var {
            Variable::N => self.n,
            Variable::I => self.i,
            Variable::Pv => self.pv,
            Variable::Pmt => self.pmt,
            Variable::Fv => self.fv,
        }
    }

    /// Writes a variable without validation.
    pub fn put(&mut self, var: Variable, value: f64) {
        let slot = match var {
            Variable::N => &mut self.n,
            Variable::I => &mut self.i,
            Variable::Pv => &mut self.pv,
            Variable::Pmt => &mut self.pmt,
            Variable::Fv => &mut self.fv,
        };
        *slot = value;
    }

    /// Fails with [`TvmError::Domain`] unless `i > 0`.
    pub fn require_positive_rate(&self) -> TvmResult<()> {
        if self.i > 0.0 {
            Ok(())
        } else {
            Err(TvmError::Domain)
        }
    }
}
