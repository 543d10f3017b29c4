//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{Domain, SolverConfig, SolverResult};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// Convergence is declared when the step `|f(x_n) / f'(x_n)|` drops below
/// `config.tolerance`. The iteration stops with an error as soon as:
///
/// - the current iterate is rejected by `domain` (checked before each step)
/// - `f(x)` or `f'(x)` is non-finite, or `f'(x)` is exactly zero
/// - the new iterate is non-finite
/// - the converged root is rejected by `domain`
/// - `config.max_iterations` steps pass without convergence
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `domain` - Admissible region for iterates and the root
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use tvm_math::solvers::{newton_raphson, Domain, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, Domain::Unbounded, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    domain: Domain,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        if !domain.admits_iterate(x) {
            return Err(MathError::outside_domain(x, domain));
        }

        let fx = f(x);
        let dfx = df(x);

        if !fx.is_finite() || !dfx.is_finite() {
            return Err(MathError::NonFiniteEvaluation { iteration, x });
        }
        if dfx == 0.0 {
            return Err(MathError::ZeroDerivative { iteration, x });
        }

        // Newton step
        let step = fx / dfx;
        x -= step;

        if !x.is_finite() {
            return Err(MathError::Diverged { iteration, x });
        }

        if step.abs() < config.tolerance {
            if !domain.admits_root(x) {
                return Err(MathError::outside_domain(x, domain));
            }
            log::trace!("newton converged to {x} after {} iterations", iteration + 1);
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}
