//! # TVM Core
//!
//! Time-value-of-money calculator: five shared variables (`n`, `i`, `PV`,
//! `PMT`, `FV`) driven by a tiny command language.
//!
//! This crate provides:
//!
//! - **State**: [`FinancialState`] and the [`Variable`] names
//! - **Equations**: the annuity relation, its derivatives and closed forms
//! - **Solve**: Newton-Raphson solutions for `n` and `i`
//! - **Commands**: parsing of `set`, `compute` and `clear`
//! - **Calculator**: the dispatcher that applies commands to the state
//! - **Session**: the line-by-line driver with strict and keep-going modes
//!
//! ## Example
//!
//! ```rust
//! use tvm_core::Calculator;
//!
//! let mut calc = Calculator::new();
//! for line in ["set n 360", "set i 0.005", "set PV 100000", "set FV 0"] {
//!     calc.process_line(line).unwrap();
//! }
//! let output = calc.process_line("compute PMT").unwrap().unwrap();
//! assert_eq!(output.to_string(), "PMT = -599.55");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod calculator;
pub mod command;
pub mod equations;
pub mod error;
pub mod input;
pub mod session;
pub mod solve;
pub mod state;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calculator::{Calculator, Output};
    pub use crate::command::Command;
    pub use crate::error::{LineError, TvmError, TvmResult};
    pub use crate::input::{LineLimit, LineReader};
    pub use crate::session::{FailurePolicy, Session, SessionConfig, SessionError, SessionSummary};
    pub use crate::state::{FinancialState, Variable};
}

pub use calculator::{Calculator, Output};
pub use command::Command;
pub use error::{LineError, TvmError, TvmResult};
pub use session::{FailurePolicy, Session, SessionConfig, SessionError, SessionSummary};
pub use state::{FinancialState, Variable};
