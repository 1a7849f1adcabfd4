//! Core reassignment advisor: a supplemental, advisory pass that looks for a
//! cheap fix when a core fails Feng & Mok's composition check.
//!
//! This never changes the outcome of the run by itself and never fails it;
//! it only logs a suggestion. A human (or a future automated pass) decides
//! whether to act on it and re-run.

use crate::feng_mok::validate_theorem1;
use crate::model::System;

#[cfg(test)]
use crate::model::{Component, Core, Scheduler, Task};

/// One suggested move: relocate `component` from `from_core` to `to_core`,
/// which would make both the source and destination cores individually pass
/// Theorem 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Reassignment {
    pub component: String,
    pub from_core: String,
    pub to_core: String,
}

/// For every core that currently fails Theorem 1, try relocating each of its
/// components (in attachment order) to the first other core (in system
/// order) where both cores would then pass. Returns at most one suggestion
/// per failing core: the first relocation found, in component-then-core
/// iteration order.
///
/// Does not mutate `system`; the caller applies (or ignores) the advice.
pub fn advise_reassignments(system: &System) -> Vec<Reassignment> {
    let mut advice = Vec::new();

    for failing_core in &system.cores {
        let children: Vec<(f64, f64)> = failing_core
            .components
            .iter()
            .map(|comp| (comp.alpha, comp.delta))
            .collect();
        let (passes, _) = validate_theorem1(&children, 1.0, 0.0);
        if passes {
            continue;
        }

        tracing::warn!(core = %failing_core.name, "core fails composition check, looking for a reassignment");

        if let Some(found) = find_relocation(system, &failing_core.name) {
            tracing::info!(
                component = %found.component,
                from = %found.from_core,
                to = %found.to_core,
                "advisory: relocating this component would restore schedulability on both cores"
            );
            advice.push(found);
        } else {
            tracing::warn!(core = %failing_core.name, "no single-component relocation resolves this core");
        }
    }

    advice
}

fn find_relocation(system: &System, failing_core_name: &str) -> Option<Reassignment> {
    let failing_core = system.find_core(failing_core_name)?;

    for moved in &failing_core.components {
        let remaining: Vec<(f64, f64)> = failing_core
            .components
            .iter()
            .filter(|comp| comp.name != moved.name)
            .map(|comp| (comp.alpha, comp.delta))
            .collect();
        let (source_ok, _) = validate_theorem1(&remaining, 1.0, 0.0);
        if !source_ok {
            continue;
        }

        for candidate_core in &system.cores {
            if candidate_core.name == failing_core_name {
                continue;
            }

            let mut with_moved: Vec<(f64, f64)> = candidate_core
                .components
                .iter()
                .map(|comp| (comp.alpha, comp.delta))
                .collect();
            with_moved.push((moved.alpha, moved.delta));

            let (dest_ok, _) = validate_theorem1(&with_moved, 1.0, 0.0);
            if dest_ok {
                return Some(Reassignment {
                    component: moved.name.clone(),
                    from_core: failing_core_name.to_owned(),
                    to_core: candidate_core.name.clone(),
                });
            }
        }
    }

    None
}

#[cfg(test)]
fn comp(name: &str, core_id: &str, alpha: f64, delta: f64) -> Component {
    Component {
        name: name.into(),
        core_id: core_id.into(),
        scheduler: Scheduler::Fps,
        alpha,
        delta,
        tasks: vec![Task::new("T", 1.0, 10.0, 0)],
    }
}

#[test]
fn suggests_relocation_that_fixes_overloaded_core() {
    let system = System {
        cores: vec![
            Core {
                name: "CoreA".into(),
                speed: 1.0,
                components: vec![comp("C1", "CoreA", 0.7, 1.0), comp("C2", "CoreA", 0.6, 1.0)],
            },
            Core {
                name: "CoreB".into(),
                speed: 1.0,
                components: vec![comp("C3", "CoreB", 0.2, 1.0)],
            },
        ],
    };

    let advice = advise_reassignments(&system);
    assert_eq!(advice.len(), 1);
    assert_eq!(advice[0].from_core, "CoreA");
    assert_eq!(advice[0].to_core, "CoreB");
}

#[test]
fn no_advice_when_every_core_passes() {
    let system = System {
        cores: vec![Core {
            name: "CoreA".into(),
            speed: 1.0,
            components: vec![comp("C1", "CoreA", 0.3, 1.0)],
        }],
    };

    assert!(advise_reassignments(&system).is_empty());
}
