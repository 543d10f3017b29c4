//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: quadratic convergence when the derivative is available,
//!   guarded by a [`Domain`] that rejects inadmissible iterates and roots
//!
//! # Example: periodic rate of a zero-coupon deposit
//!
//! ```rust
//! use tvm_math::solvers::{newton_raphson, Domain, SolverConfig};
//!
//! // 100 grows to 150 over 10 periods: (1 + r)^10 = 1.5
//! let f = |r: f64| 100.0 * (1.0 + r).powi(10) - 150.0;
//! let df = |r: f64| 1000.0 * (1.0 + r).powi(9);
//!
//! let result = newton_raphson(f, df, 0.01, Domain::Positive, &SolverConfig::default()).unwrap();
//! assert!((result.root - 0.041_379_743_992).abs() < 1e-9);
//! ```

use std::fmt;

mod newton;

pub use newton::newton_raphson;

/// Default step tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100_000;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Convergence is declared once a Newton step is smaller than this.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Admissible region for Newton iterates and the converged root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Domain {
    /// Any finite value is admissible.
    #[default]
    Unbounded,
    /// Iterates may wander, but the converged root must be strictly positive.
    PositiveRoot,
    /// Every iterate, including the initial guess, and the root must be
    /// strictly positive.
    Positive,
}

impl Domain {
    /// Whether `x` may be used as the point of the next Newton step.
    #[must_use]
    pub fn admits_iterate(self, x: f64) -> bool {
        match self {
            Self::Unbounded | Self::PositiveRoot => true,
            Self::Positive => x > 0.0,
        }
    }

    /// Whether `x` is acceptable as a converged root.
    #[must_use]
    pub fn admits_root(self, x: f64) -> bool {
        match self {
            Self::Unbounded => true,
            Self::PositiveRoot | Self::Positive => x > 0.0,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unbounded => "unbounded",
            Self::PositiveRoot => "positive-root",
            Self::Positive => "positive",
        };
        f.write_str(name)
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}
