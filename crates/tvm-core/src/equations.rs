//! The ordinary-annuity relation and its closed forms.
//!
//! With `a = 1 + i`, the five variables satisfy
//!
//! ```text
//! PV·aⁿ + PMT·(aⁿ − 1)/i + FV = 0
//! ```
//!
//! which is evaluated as `(PV + PMT/i)·aⁿ − PMT/i + FV`. The root finder
//! works on that form as a function of `n` or of `i`; `PV`, `PMT` and `FV`
//! are solved directly. The arrangements below are kept exactly as written
//! because they decide behavior at extreme magnitudes.

use crate::error::{TvmError, TvmResult};
use crate::state::FinancialState;

/// The annuity relation as a function of the number of periods.
pub fn f_n(state: &FinancialState, x: f64) -> f64 {
    let a = 1.0 + state.i;
    let term = state.pv + state.pmt / state.i;
    term * a.powf(x) - state.pmt / state.i + state.fv
}

/// Derivative of [`f_n`] with respect to the number of periods.
pub fn f_n_prime(state: &FinancialState, x: f64) -> f64 {
    let a = 1.0 + state.i;
    a.ln() * (state.pv + state.pmt / state.i) * a.powf(x)
}

/// The annuity relation as a function of the interest rate.
pub fn f_i(state: &FinancialState, x: f64) -> f64 {
    let a = 1.0 + x;
    let term = state.pv + state.pmt / x;
    term * a.powf(state.n) - state.pmt / x + state.fv
}

/// Derivative of [`f_i`] with respect to the interest rate.
pub fn f_i_prime(state: &FinancialState, x: f64) -> f64 {
    let a = 1.0 + x;
    let a_to_n = a.powf(state.n);
    let first = state.n * (state.pv + state.pmt / x) * a.powf(state.n - 1.0);
    let second = state.pmt * (a_to_n + 1.0) / (x * x);
    first - second
}

/// Present value: `−PMT·(1 − a⁻ⁿ)/i − FV·a⁻ⁿ`.
pub fn solve_pv(state: &FinancialState) -> TvmResult<f64> {
    state.require_positive_rate()?;
    let disc = (1.0 + state.i).powf(-state.n);
    Ok(-state.pmt * (1.0 - disc) / state.i - state.fv * disc)
}

/// Payment: `i·(PV·aⁿ + FV)/(1 − aⁿ)`.
///
/// A denominator of exactly zero is reported as a convergence failure.
pub fn solve_pmt(state: &FinancialState) -> TvmResult<f64> {
    state.require_positive_rate()?;
    let a_to_n = (1.0 + state.i).powf(state.n);
    let denom = 1.0 - a_to_n;
    if denom == 0.0 {
        return Err(TvmError::convergence());
    }
    Ok(state.i * (state.pv * a_to_n + state.fv) / denom)
}

/// Future value: `−PV·aⁿ − PMT·(aⁿ − 1)/i`.
pub fn solve_fv(state: &FinancialState) -> TvmResult<f64> {
    state.require_positive_rate()?;
    let a_to_n = (1.0 + state.i).powf(state.n);
    Ok(-state.pv * a_to_n - state.pmt * (a_to_n - 1.0) / state.i)
}
