//! Aggregates a [`SimulationOutcome`] and the system model into the report
//! rows written out as the solution CSV and echoed in the run summary.

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::model::System;
use crate::simulate::SimulationOutcome;

#[cfg(test)]
use crate::model::{Component, Core, Scheduler, Task};
#[cfg(test)]
use std::collections::HashMap;

/// Per-task response-time summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskReport {
    pub task: String,
    pub component: String,
    pub avg_response_time: f64,
    pub max_response_time: f64,
    /// `max_response_time <= deadline`. A task with no observed jobs (e.g. in
    /// an excluded component) is reported unschedulable.
    pub schedulable: bool,
}

/// Per-component summary: the synthesized BDR interface and whether every one
/// of its tasks met its deadline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentReport {
    pub component: String,
    pub core: String,
    pub alpha: f64,
    pub delta: f64,
    pub schedulable: bool,
    pub excluded: bool,
}

/// The full report for one run: per-task and per-component breakdowns plus
/// the overall verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionReport {
    pub tasks: Vec<TaskReport>,
    pub components: Vec<ComponentReport>,
    /// Conjunction of every component's `schedulable` flag.
    pub schedulable: bool,
}

/// Build a [`SolutionReport`] from the system model and a completed
/// simulation. Component order follows [`System::components`] (core then
/// attachment order); task order follows the owning component's task order.
pub fn build_report(system: &System, outcome: &SimulationOutcome) -> SolutionReport {
    let mut tasks = Vec::new();
    let mut components = Vec::new();
    let mut overall_schedulable = true;

    for comp in system.components() {
        let excluded = outcome.excluded_components.iter().any(|name| name == &comp.name);
        let mut component_schedulable = !excluded;

        for task in &comp.tasks {
            let observed = outcome.response_times.get(&task.name).cloned().unwrap_or_default();
            let (avg, max) = if observed.is_empty() {
                (0.0, 0.0)
            } else {
                let sum: f64 = observed.iter().sum();
                let max = observed.iter().map(|rt| OrderedFloat(*rt)).max().unwrap().0;
                (sum / observed.len() as f64, max)
            };

            let task_schedulable = !excluded && !observed.is_empty() && max <= task.deadline;
            component_schedulable &= task_schedulable;

            tasks.push(TaskReport {
                task: task.name.clone(),
                component: comp.name.clone(),
                avg_response_time: avg,
                max_response_time: max,
                schedulable: task_schedulable,
            });
        }

        overall_schedulable &= component_schedulable;

        components.push(ComponentReport {
            component: comp.name.clone(),
            core: comp.core_id.clone(),
            alpha: comp.alpha,
            delta: comp.delta,
            schedulable: component_schedulable,
            excluded,
        });
    }

    SolutionReport {
        tasks,
        components,
        schedulable: overall_schedulable,
    }
}

#[cfg(test)]
fn system_with_one_task(deadline: f64) -> System {
    let mut t1 = Task::new("T1", 2.0, 5.0, 0);
    t1.deadline = deadline;
    System {
        cores: vec![Core {
            name: "Core1".into(),
            speed: 1.0,
            components: vec![Component {
                name: "C1".into(),
                core_id: "Core1".into(),
                scheduler: Scheduler::Fps,
                alpha: 0.5,
                delta: 1.0,
                tasks: vec![t1],
            }],
        }],
    }
}

#[test]
fn task_within_deadline_is_schedulable() {
    let system = system_with_one_task(10.0);
    let mut response_times = HashMap::new();
    response_times.insert("T1".to_owned(), vec![3.0, 4.0]);
    let outcome = SimulationOutcome {
        response_times,
        execution_trace: HashMap::new(),
        excluded_components: vec![],
        horizon: 10,
    };

    let report = build_report(&system, &outcome);
    assert!(report.schedulable);
    assert_eq!(report.tasks[0].max_response_time, 4.0);
}

#[test]
fn task_missing_deadline_marks_component_unschedulable() {
    let system = system_with_one_task(3.0);
    let mut response_times = HashMap::new();
    response_times.insert("T1".to_owned(), vec![3.0, 5.0]);
    let outcome = SimulationOutcome {
        response_times,
        execution_trace: HashMap::new(),
        excluded_components: vec![],
        horizon: 10,
    };

    let report = build_report(&system, &outcome);
    assert!(!report.schedulable);
    assert!(!report.components[0].schedulable);
}

#[test]
fn excluded_component_is_reported_unschedulable() {
    let system = system_with_one_task(10.0);
    let outcome = SimulationOutcome {
        response_times: HashMap::new(),
        execution_trace: HashMap::new(),
        excluded_components: vec!["C1".to_owned()],
        horizon: 10,
    };

    let report = build_report(&system, &outcome);
    assert!(!report.schedulable);
    assert!(report.components[0].excluded);
    assert!(!report.tasks[0].schedulable);
}
