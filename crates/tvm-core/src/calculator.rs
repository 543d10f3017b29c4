//! The command dispatcher.

use std::fmt;

use tracing::debug;
use tvm_math::solvers::SolverConfig;

use crate::command::Command;
use crate::equations::{solve_fv, solve_pmt, solve_pv};
use crate::error::TvmResult;
use crate::solve::{solve_i, solve_n};
use crate::state::{FinancialState, Variable};

/// A computed variable, ready to be printed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Output {
    /// Variable that was computed.
    pub variable: Variable,
    /// Its new value.
    pub value: f64,
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}",
            self.variable,
            format_fixed(self.value, self.variable.precision())
        )
    }
}

/// Fixed-point formatting that spells non-finite values the way C's `%f`
/// does (`inf`, `-inf`, `nan`, `-nan`).
pub fn format_fixed(value: f64, precision: usize) -> String {
    if value.is_nan() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        format!("{sign}nan")
    } else {
        format!("{value:.precision$}")
    }
}

/// Owns the financial state and applies commands to it.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: FinancialState,
    solver: SolverConfig,
}

impl Calculator {
    /// Creates a calculator with a zeroed state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the root-finder configuration.
    #[must_use]
    pub fn with_solver_config(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Current variable values.
    pub fn state(&self) -> &FinancialState {
        &self.state
    }

    /// Parses and executes one line.
    ///
    /// Returns the value to print for `compute`, `None` otherwise.
    pub fn process_line(&mut self, line: &str) -> TvmResult<Option<Output>> {
        let command = Command::parse(line)?;
        self.execute(command)
    }

    /// Executes a parsed command.
    pub fn execute(&mut self, command: Command) -> TvmResult<Option<Output>> {
        debug!(?command, "executing");
        match command {
            Command::Empty => Ok(None),
            Command::Clear => {
                self.state.clear();
                Ok(None)
            }
            Command::Set(variable, value) => {
                self.set(variable, value)?;
                Ok(None)
            }
            Command::Compute(variable) => {
                let value = self.compute(variable)?;
                Ok(Some(Output { variable, value }))
            }
        }
    }

    /// Assigns a validated value.
    pub fn set(&mut self, variable: Variable, value: f64) -> TvmResult<()> {
        let value = variable.validate(value)?;
        self.state.put(variable, value);
        Ok(())
    }

    /// Solves for `variable` from the other four and stores the result.
    pub fn compute(&mut self, variable: Variable) -> TvmResult<f64> {
        let value = match variable {
            Variable::N => solve_n(&self.state, &self.solver)?,
            Variable::I => solve_i(&self.state, &self.solver)?,
            Variable::Pv => solve_pv(&self.state)?,
            Variable::Pmt => solve_pmt(&self.state)?,
            Variable::Fv => solve_fv(&self.state)?,
        };
        self.state.put(variable, value);
        Ok(value)
    }
}
