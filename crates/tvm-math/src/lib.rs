//! # TVM Math
//!
//! Numerical building blocks for the TVM calculator.
//!
//! This crate provides:
//!
//! - **Solvers**: Newton-Raphson root finding with domain guards
//!
//! ## Design Philosophy
//!
//! - **Fail Loudly**: Every non-finite value, flat derivative or domain
//!   excursion is reported as a typed [`MathError`]
//! - **Generic**: Solvers take plain closures so callers keep their own state

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{newton_raphson, Domain, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
