//! BDR interface synthesis and the Half-Half transformation.
//!
//! Synthesis ([`find_min_bdr_params`]) searches for the smallest `(alpha,
//! delta)` BDR interface under which a component's task set is schedulable.
//! The Half-Half transform ([`half_half_transform`]) turns a BDR interface
//! into a concrete periodic server `(C_supply, T_supply)` that the simulator
//! can run.

use crate::demand::{dbf_edf, dbf_fps, sbf_bdr};
use crate::error::BdrDomainError;
use crate::model::{Scheduler, Task};

/// Default analysis horizon `H`, in ticks. A heuristic bound; callers with
/// long-hyperperiod tasksets should pass a sound bound explicitly (the
/// largest absolute deadline up to the hyperperiod).
pub const DEFAULT_HORIZON: u64 = 100;

/// Number of evenly spaced grid points searched for `alpha` in `[0.01, 1.0]`
/// at each candidate `delta`.
const ALPHA_GRID_SIZE: usize = 200;

/// Outcome of a BDR synthesis search: either the smallest schedulable
/// interface, or a witness that none exists within the horizon.
///
/// Modeled as an explicit sum type rather than a sentinel value, per the
/// design notes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BdrOutcome {
    Found { alpha: f64, delta: f64 },
    Infeasible,
}

impl BdrOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, BdrOutcome::Found { .. })
    }
}

/// Find the lexicographically first `(delta, alpha)` (delta small then alpha
/// small) such that `sbf(alpha, delta, t) >= dbf_policy(t)` for every integer
/// `t` in `[1, horizon]`.
///
/// The search bounds `delta` first because a lower `delta` (less worst-case
/// starvation) is the scarcer resource for short-deadline tasks; for a fixed
/// `delta`, the supply-bound function is monotone in `alpha`, so a linear
/// grid search over `alpha` is sufficient to find the least feasible value
/// to the grid's resolution.
pub fn find_min_bdr_params(tasks: &[Task], scheduler: Scheduler, horizon: u64) -> BdrOutcome {
    let alpha_grid: Vec<f64> = (0..ALPHA_GRID_SIZE)
        .map(|i| 0.01 + (1.0 - 0.01) * (i as f64) / ((ALPHA_GRID_SIZE - 1) as f64))
        .collect();

    for delta in 1..=horizon {
        let delta = delta as f64;

        for &alpha in &alpha_grid {
            let ok = (1..=horizon).all(|t| {
                let t = t as f64;
                let demand = match scheduler {
                    Scheduler::Edf => dbf_edf(tasks, t),
                    Scheduler::Fps => dbf_fps(tasks, t),
                };
                sbf_bdr(alpha, delta, t) >= demand
            });

            if ok {
                return BdrOutcome::Found {
                    alpha: round3(alpha),
                    delta,
                };
            }
        }
    }

    BdrOutcome::Infeasible
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Convert a BDR interface `(alpha, delta)` into a periodic server `(C_supply,
/// T_supply)`:
///
/// `T_supply = delta / (2 * (1 - alpha))`, `C_supply = alpha * T_supply`.
///
/// `delta <= 0` is substituted with `delta = 1` to avoid degeneracy.
/// `alpha >= 1` is outside the transform's domain and yields
/// [`BdrDomainError`].
pub fn half_half_transform(alpha: f64, delta: f64) -> Result<(f64, f64), BdrDomainError> {
    if alpha >= 1.0 {
        return Err(BdrDomainError { alpha });
    }

    let delta = if delta <= 0.0 { 1.0 } else { delta };

    let t_supply = delta / (2.0 * (1.0 - alpha));
    let c_supply = alpha * t_supply;

    Ok((c_supply, t_supply))
}

#[test]
fn half_half_identity_holds() {
    use assert_approx_eq::assert_approx_eq;

    let (c, t) = half_half_transform(0.4, 3.0).unwrap();
    assert_approx_eq!(c / t, 0.4, 1e-9);
    assert_approx_eq!(2.0 * (t - c), 3.0, 1e-9);
}

#[test]
fn half_half_rejects_alpha_at_or_above_one() {
    assert!(half_half_transform(1.0, 3.0).is_err());
    assert!(half_half_transform(1.2, 3.0).is_err());
}

#[test]
fn half_half_substitutes_nonpositive_delta() {
    use assert_approx_eq::assert_approx_eq;

    let (c, t) = half_half_transform(0.5, 0.0).unwrap();
    assert_approx_eq!(t, 1.0 / (2.0 * 0.5), 1e-9);
    assert_approx_eq!(c, 0.5 * t, 1e-9);
}

#[test]
fn synthesis_finds_interface_for_light_edf_taskset() {
    let t1 = Task::new("T1", 2.0, 5.0, 0);
    let t2 = Task::new("T2", 2.0, 10.0, 0);
    let outcome = find_min_bdr_params(&[t1, t2], Scheduler::Edf, DEFAULT_HORIZON);

    match outcome {
        BdrOutcome::Found { alpha, delta } => {
            assert!(alpha <= 0.7);
            assert!(delta >= 1.0);
        }
        BdrOutcome::Infeasible => panic!("expected a feasible BDR interface"),
    }
}

#[test]
fn synthesis_reports_infeasible_for_saturated_taskset() {
    // Utilization 1.0 cannot be bounded by any alpha < 1.0 on this grid.
    let t1 = Task::new("T1", 4.0, 5.0, 0);
    let t2 = Task::new("T2", 2.0, 10.0, 0);
    let outcome = find_min_bdr_params(&[t1, t2], Scheduler::Edf, DEFAULT_HORIZON);
    assert_eq!(outcome, BdrOutcome::Infeasible);
}
