//! Demand-bound functions (dbf) for EDF and FPS, and the BDR supply-bound
//! function (sbf).
//!
//! All three are evaluated only at positive integer `t`, as required by the
//! BDR synthesis grid search in [`crate::bdr`].

use ordered_float::OrderedFloat;

use crate::model::Task;
use crate::time::{ceil_div, floor_div};

/// Baruah's EDF demand-bound function, summed over the whole task set:
///
/// `dbf_EDF(tau, t) = sum_i max(0, floor((t + P_i - D_i) / P_i)) * C_i`
pub fn dbf_edf(tasks: &[Task], t: f64) -> f64 {
    tasks
        .iter()
        .map(|task| {
            let jobs = floor_div(t + task.period - task.deadline, task.period);
            jobs.max(0.0) * task.wcet
        })
        .sum()
}

/// FPS demand-bound function for a single task `task_k`, given the full
/// component task set (used to find tasks of strictly higher priority):
///
/// `dbf_FPS(tau, t, task_k) = C_k + sum_{j in hp(k)} ceil(t / P_j) * C_j`
pub fn dbf_fps_task(tasks: &[Task], t: f64, task_k: &Task) -> f64 {
    let interference: f64 = tasks
        .iter()
        .filter(|other| other.priority < task_k.priority)
        .map(|hp| ceil_div(t, hp.period) * hp.wcet)
        .sum();

    task_k.wcet + interference
}

/// Component-level FPS demand at `t`: the maximum over all tasks of their
/// individual [`dbf_fps_task`].
pub fn dbf_fps(tasks: &[Task], t: f64) -> f64 {
    tasks
        .iter()
        .map(|task_k| OrderedFloat(dbf_fps_task(tasks, t, task_k)))
        .max()
        .map(|demand| demand.0)
        .unwrap_or(0.0)
}

/// BDR supply-bound function: `sbf(alpha, delta, t) = max(0, alpha * (t -
/// delta))`.
pub fn sbf_bdr(alpha: f64, delta: f64, t: f64) -> f64 {
    (alpha * (t - delta)).max(0.0)
}

#[test]
fn dbf_edf_single_task() {
    let t1 = Task::new("T1", 2.0, 5.0, 0);
    assert_eq!(dbf_edf(&[t1.clone()], 1.0), 0.0);
    assert_eq!(dbf_edf(&[t1.clone()], 5.0), 2.0);
    assert_eq!(dbf_edf(&[t1], 6.0), 2.0);
}

#[test]
fn dbf_fps_accounts_only_for_higher_priority() {
    let hi = Task::new("T1", 2.0, 5.0, 1);
    let lo = Task::new("T2", 3.0, 10.0, 2);
    let taskset = [hi.clone(), lo.clone()];

    // T1 has no interference (nothing of higher priority).
    assert_eq!(dbf_fps_task(&taskset, 5.0, &hi), 2.0);
    // T2 is interfered with by one release of T1 within [0,5].
    assert_eq!(dbf_fps_task(&taskset, 5.0, &lo), 3.0 + 2.0);
}

#[test]
fn sbf_is_zero_before_delta() {
    assert_eq!(sbf_bdr(0.5, 3.0, 2.0), 0.0);
    assert_eq!(sbf_bdr(0.5, 3.0, 5.0), 1.0);
}
