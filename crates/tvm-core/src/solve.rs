//! Iterative solutions for `n` and `i`.

use tracing::debug;
use tvm_math::solvers::{newton_raphson, Domain, SolverConfig};

use crate::equations::{f_i, f_i_prime, f_n, f_n_prime};
use crate::error::TvmResult;
use crate::state::FinancialState;

/// Starting number of periods for the `n` solver.
pub const N_INITIAL_GUESS: f64 = 360.0;

/// Starting interest rate for the `i` solver.
pub const I_INITIAL_GUESS: f64 = 0.0025;

/// Solves the annuity relation for the number of periods.
///
/// Requires `i > 0`. The converged root must be positive and is rounded up
/// to the next whole period.
pub fn solve_n(state: &FinancialState, config: &SolverConfig) -> TvmResult<f64> {
    state.require_positive_rate()?;

    let result = newton_raphson(
        |x| f_n(state, x),
        |x| f_n_prime(state, x),
        N_INITIAL_GUESS,
        Domain::PositiveRoot,
        config,
    )
    .inspect_err(|err| debug!(%err, "n solver failed"))?;

    debug!(
        root = result.root,
        iterations = result.iterations,
        residual = result.residual,
        "n solver converged"
    );
    Ok(result.root.ceil())
}

/// Solves the annuity relation for the interest rate per period.
///
/// Every iterate, starting with the initial guess, must stay positive.
pub fn solve_i(state: &FinancialState, config: &SolverConfig) -> TvmResult<f64> {
    let result = newton_raphson(
        |x| f_i(state, x),
        |x| f_i_prime(state, x),
        I_INITIAL_GUESS,
        Domain::Positive,
        config,
    )
    .inspect_err(|err| debug!(%err, "i solver failed"))?;

    debug!(
        root = result.root,
        iterations = result.iterations,
        residual = result.residual,
        "i solver converged"
    );
    Ok(result.root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TvmError;
    use approx::assert_relative_eq;
    use tvm_math::MathError;

    fn state(n: f64, i: f64, pv: f64, pmt: f64, fv: f64) -> FinancialState {
        FinancialState { n, i, pv, pmt, fv }
    }

    #[test]
    fn test_n_rounds_up_fractional_root() {
        // Root is 10.5886...
        let s = state(0.0, 0.01, 1000.0, -100.0, 0.0);
        assert_eq!(solve_n(&s, &SolverConfig::default()).unwrap(), 11.0);
    }

    #[test]
    fn test_n_for_savings_goal() {
        // 100 per period at 0.5% reaches 10000 after 81.29... periods.
        let s = state(0.0, 0.005, 0.0, -100.0, 10_000.0);
        assert_eq!(solve_n(&s, &SolverConfig::default()).unwrap(), 82.0);
    }

    #[test]
    fn test_n_rounded_payment_needs_extra_period() {
        // The payment rounded to cents leaves a sliver beyond 360.
        let s = state(0.0, 0.005, 100_000.0, -599.55, 0.0);
        assert_eq!(solve_n(&s, &SolverConfig::default()).unwrap(), 361.0);
    }

    #[test]
    fn test_n_requires_positive_rate() {
        let s = state(0.0, 0.0, 1000.0, -100.0, 0.0);
        assert_eq!(solve_n(&s, &SolverConfig::default()), Err(TvmError::Domain));
    }

    #[test]
    fn test_n_negative_root_rejected() {
        let s = state(0.0, 0.01, 1000.0, 100.0, 0.0);
        let err = solve_n(&s, &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TvmError::Convergence(Some(MathError::OutsideDomain { .. }))
        ));
    }

    #[test]
    fn test_i_for_mortgage() {
        let s = state(360.0, 0.0, 100_000.0, -599.55, 0.0);
        let i = solve_i(&s, &SolverConfig::default()).unwrap();
        assert_relative_eq!(i, 0.005, epsilon = 1e-7);
    }

    #[test]
    fn test_i_for_lump_sum() {
        // 1000 doubles in 10 periods: (1+i)^10 = 2.
        let s = state(10.0, 0.0, 1000.0, 0.0, -2000.0);
        let i = solve_i(&s, &SolverConfig::default()).unwrap();
        assert_relative_eq!(i, 2f64.powf(0.1) - 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_i_iterate_goes_negative() {
        let s = state(10.0, 0.0, 1000.0, 100.0, 100.0);
        let err = solve_i(&s, &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TvmError::Convergence(Some(MathError::OutsideDomain { .. }))
        ));
    }

    #[test]
    fn test_i_after_clear_has_flat_derivative() {
        let err = solve_i(&FinancialState::new(), &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TvmError::Convergence(Some(MathError::ZeroDerivative { .. }))
        ));
    }

    #[test]
    fn test_iteration_cap_is_respected() {
        let s = state(360.0, 0.0, 100_000.0, -599.55, 0.0);
        let config = SolverConfig::default().with_max_iterations(2);
        let err = solve_i(&s, &config).unwrap_err();
        assert!(matches!(
            err,
            TvmError::Convergence(Some(MathError::ConvergenceFailed { iterations: 2, .. }))
        ));
    }
}
