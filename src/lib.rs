/*!
# Hierarchical Scheduling Analysis (HSA)

This crate analyzes and simulates hierarchical real-time systems built out of
cores, scheduling components, and periodic tasks. A component receives CPU
from its core through a Bounded-Delay Resource (BDR) interface `(alpha,
delta)`; this crate finds the smallest such interface for which a component's
task set is schedulable, checks that sibling components co-schedule on their
core (Feng & Mok's composition theorem), and runs a discrete-event simulation
of the resulting hierarchy to report per-task response times.

## Scope

The crate is not a general-purpose scheduling-theory library: it implements
one specific model (BDR interfaces, Half-Half transformation, FPS/EDF local
scheduling) end to end, from CSV input to a solution CSV and a textual
report. Everything under [`io`] and [`logging`] is ambient plumbing around
that core.
*/

pub mod error;
pub mod model;
pub mod time;
pub mod demand;
pub mod bdr;
pub mod feng_mok;
pub mod simulate;
pub mod reassign;
pub mod report;
pub mod io;
pub mod logging;

pub mod prelude {
    pub use crate::bdr::{half_half_transform, find_min_bdr_params, BdrOutcome};
    pub use crate::demand::{dbf_edf, dbf_fps, sbf_bdr};
    pub use crate::error::EngineError;
    pub use crate::feng_mok::{validate_theorem1, ParentInterface};
    pub use crate::model::{Core, Component, Scheduler, System, Task};
    pub use crate::report::{ComponentReport, SolutionReport, TaskReport};
    pub use crate::simulate::{simulate, SimulationOutcome};
}
