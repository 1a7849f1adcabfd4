//! The core data model: tasks, components, cores and the system they form.
//!
//! Ownership follows the hierarchy described by the input tables: a [`Core`]
//! owns its [`Component`]s, a `Component` owns its [`Task`]s. Cross-references
//! (task -> component, component -> core) are stored as plain string
//! identities and resolved by lookup, never as back-pointers.

use std::collections::HashMap;

use itertools::Itertools;

/// A periodic task: releases one job at every integer multiple of `period`.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Task {
    pub name: String,
    pub wcet: f64,
    pub bcet: f64,
    pub period: f64,
    pub deadline: f64,
    /// Lower value = higher urgency under FPS. Ignored under EDF.
    pub priority: i64,
    pub component_id: String,
}

impl Task {
    /// Build an implicit-deadline task with no component assigned yet:
    /// `bcet = wcet`, `deadline = period`.
    pub fn new(name: &str, wcet: f64, period: f64, priority: i64) -> Self {
        Self {
            name: name.to_owned(),
            wcet,
            bcet: wcet,
            period,
            deadline: period,
            priority,
            component_id: String::new(),
        }
    }

    pub fn utilization(&self) -> f64 {
        self.wcet / self.period
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Task({}, wcet={}, period={}, deadline={}, priority={})",
            self.name, self.wcet, self.period, self.deadline, self.priority
        )
    }
}

/// Local scheduling policy of a component.
///
/// A closed, two-variant model: no open extension is intended (see
/// [`Scheduler::pick_next`] for the single dispatch point).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Scheduler {
    #[serde(alias = "FPS", alias = "RM", alias = "fps", alias = "rm")]
    Fps,
    #[serde(alias = "EDF", alias = "edf")]
    Edf,
}

impl Scheduler {
    /// Parse a scheduler name from input data, treating the historical `"RM"`
    /// label as Fixed-Priority (see the open question on RM inputs).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "FPS" | "RM" => Some(Scheduler::Fps),
            "EDF" => Some(Scheduler::Edf),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheduler::Fps => write!(f, "FPS"),
            Scheduler::Edf => write!(f, "EDF"),
        }
    }
}

/// A schedulable container: a local policy plus a BDR interface `(alpha,
/// delta)` that its parent core must honor.
#[derive(Debug, Clone)]
pub struct Component {
    pub name: String,
    pub core_id: String,
    pub scheduler: Scheduler,
    /// `alpha` in `(0, 1]`. Starts at `budget / period` from the input and is
    /// overwritten by BDR synthesis once that has run (left unchanged if
    /// synthesis reports [`crate::bdr::BdrOutcome::Infeasible`]).
    pub alpha: f64,
    /// `delta >= 0`. Starts at `0` from the input and is overwritten by BDR
    /// synthesis.
    pub delta: f64,
    pub tasks: Vec<Task>,
}

impl Component {
    pub fn total_utilization(&self) -> f64 {
        self.tasks.iter().map(Task::utilization).sum()
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Component({}, core={}, scheduler={}, tasks={})",
            self.name,
            self.core_id,
            self.scheduler,
            self.tasks.len()
        )
    }
}

/// A physical processor. `speed` scales the rate at which granted ticks
/// retire task work (see [`crate::simulate`]).
#[derive(Debug, Clone)]
pub struct Core {
    pub name: String,
    pub speed: f64,
    pub components: Vec<Component>,
}

impl std::fmt::Display for Core {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Core({}, speed={}, components={})",
            self.name,
            self.speed,
            self.components.len()
        )
    }
}

/// The whole platform: an ordered set of cores, each owning its components.
///
/// `components` and `tasks` are flat indexes kept in sync with the owned
/// trees, so analyses that only need to look a component or task up by name
/// don't have to walk the hierarchy.
#[derive(Debug, Clone, Default)]
pub struct System {
    pub cores: Vec<Core>,
}

impl System {
    /// Iterate over every component across every core, in core/component
    /// attachment order. This is the order core arbitration uses as its
    /// deterministic tie-break.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.cores.iter().flat_map(|core| core.components.iter())
    }

    pub fn components_mut(&mut self) -> impl Iterator<Item = &mut Component> {
        self.cores.iter_mut().flat_map(|core| core.components.iter_mut())
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.components().flat_map(|comp| comp.tasks.iter())
    }

    pub fn find_component(&self, name: &str) -> Option<&Component> {
        self.components().find(|comp| comp.name == name)
    }

    pub fn find_core(&self, name: &str) -> Option<&Core> {
        self.cores.iter().find(|core| core.name == name)
    }

    /// Map from component name to the name of its owning core.
    pub fn component_cores(&self) -> HashMap<String, String> {
        self.components()
            .map(|comp| (comp.name.clone(), comp.core_id.clone()))
            .collect()
    }

    /// Distinct task periods across the whole system, used to compute the
    /// hyperperiod. Deduplicated so a repeated period doesn't pad the `lcm`
    /// fold with redundant work.
    pub fn all_periods(&self) -> Vec<f64> {
        self.tasks().map(|task| task.period).unique_by(|period| period.to_bits()).collect()
    }
}

#[test]
fn scheduler_parse_treats_rm_as_fps() {
    assert_eq!(Scheduler::parse("RM"), Some(Scheduler::Fps));
    assert_eq!(Scheduler::parse("fps"), Some(Scheduler::Fps));
    assert_eq!(Scheduler::parse("edf"), Some(Scheduler::Edf));
    assert_eq!(Scheduler::parse("bogus"), None);
}

#[test]
fn task_utilization() {
    let task = Task::new("T1", 2.0, 5.0, 0);
    assert_eq!(task.utilization(), 0.4);
}
