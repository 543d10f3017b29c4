//! Error types for mathematical operations.

use thiserror::Error;

use crate::solvers::Domain;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during root finding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Root-finding algorithm failed to converge.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// The function or its derivative evaluated to NaN or infinity.
    #[error("Non-finite evaluation at x = {x} (iteration {iteration})")]
    NonFiniteEvaluation {
        /// Iteration at which the evaluation failed.
        iteration: u32,
        /// Point of evaluation.
        x: f64,
    },

    /// The derivative vanished, so no Newton step exists.
    #[error("Zero derivative at x = {x} (iteration {iteration})")]
    ZeroDerivative {
        /// Iteration at which the derivative vanished.
        iteration: u32,
        /// Point of evaluation.
        x: f64,
    },

    /// A Newton step produced NaN or infinity.
    #[error("Iterate diverged to {x} (iteration {iteration})")]
    Diverged {
        /// Iteration that produced the non-finite iterate.
        iteration: u32,
        /// The non-finite iterate.
        x: f64,
    },

    /// An iterate or the converged root fell outside the admissible domain.
    #[error("{x} is outside the {domain} domain")]
    OutsideDomain {
        /// The offending value.
        x: f64,
        /// The domain that rejected it.
        domain: Domain,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an outside-domain error.
    #[must_use]
    pub fn outside_domain(x: f64, domain: Domain) -> Self {
        Self::OutsideDomain { x, domain }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::convergence_failed(100, 1e-6);
        assert!(err.to_string().contains("100 iterations"));
    }

    #[test]
    fn test_outside_domain_display() {
        let err = MathError::outside_domain(-0.5, Domain::Positive);
        assert_eq!(err.to_string(), "-0.5 is outside the positive domain");
    }
}
