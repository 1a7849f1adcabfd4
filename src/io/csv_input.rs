//! Loads a [`System`] from the three input tables: `architecture.csv`
//! (cores), `budgets.csv` (components) and `tasks.csv` (tasks).
//!
//! Row shapes mirror the CSV columns directly and are deserialized with
//! `csv` + `serde`, the same pairing the rest of the pack uses for tabular
//! data; the flat rows are then folded into the nested [`System`] model,
//! preserving row order as the core/component/task attachment order that
//! drives arbitration tie-breaks.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::EngineError;
use crate::model::{Component, Core, Scheduler, System, Task};

#[derive(Debug, Deserialize)]
struct ArchitectureRow {
    core_id: String,
    speed_factor: f64,
}

#[derive(Debug, Deserialize)]
struct BudgetRow {
    component_id: String,
    core_id: String,
    scheduler: String,
    budget: f64,
    period: f64,
}

#[derive(Debug, Deserialize)]
struct TaskRow {
    task_name: String,
    wcet: f64,
    bcet: Option<f64>,
    deadline: Option<f64>,
    period: f64,
    priority: Option<i64>,
    component_id: String,
}

/// Load the system model from `<input_dir>/{architecture,budgets,tasks}.csv`.
///
/// Fails fast with [`EngineError::ConfigMissing`] if any of the three files
/// is absent, and with [`EngineError::ConfigMalformed`] on the first row that
/// doesn't parse or that references an unknown core/component.
pub fn load_system(input_dir: &Path) -> Result<System, EngineError> {
    let arch_path = input_dir.join("architecture.csv");
    let budget_path = input_dir.join("budgets.csv");
    let task_path = input_dir.join("tasks.csv");

    let mut cores: Vec<Core> = Vec::new();
    let mut core_index: HashMap<String, usize> = HashMap::new();

    for row in read_rows::<ArchitectureRow>(&arch_path)? {
        let row = row?;
        core_index.insert(row.core_id.clone(), cores.len());
        cores.push(Core {
            name: row.core_id,
            speed: row.speed_factor,
            components: Vec::new(),
        });
    }

    let mut component_index: HashMap<String, (usize, usize)> = HashMap::new();

    for row in read_rows::<BudgetRow>(&budget_path)? {
        let row = row?;
        let &core_idx = core_index.get(&row.core_id).ok_or_else(|| EngineError::ConfigMalformed {
            file: display(&budget_path),
            row: row.component_id.clone(),
            detail: format!("references unknown core_id '{}'", row.core_id),
        })?;

        let scheduler = Scheduler::parse(&row.scheduler).ok_or_else(|| EngineError::ConfigMalformed {
            file: display(&budget_path),
            row: row.component_id.clone(),
            detail: format!("unknown scheduler '{}'", row.scheduler),
        })?;

        let core = &mut cores[core_idx];
        let comp_idx = core.components.len();
        component_index.insert(row.component_id.clone(), (core_idx, comp_idx));

        core.components.push(Component {
            name: row.component_id,
            core_id: row.core_id,
            scheduler,
            alpha: row.budget / row.period,
            delta: 0.0,
            tasks: Vec::new(),
        });
    }

    for row in read_rows::<TaskRow>(&task_path)? {
        let row = row?;
        let &(core_idx, comp_idx) = component_index.get(&row.component_id).ok_or_else(|| {
            EngineError::ConfigMalformed {
                file: display(&task_path),
                row: row.task_name.clone(),
                detail: format!("references unknown component_id '{}'", row.component_id),
            }
        })?;

        let task = Task {
            name: row.task_name,
            wcet: row.wcet,
            bcet: row.bcet.unwrap_or(row.wcet),
            deadline: row.deadline.unwrap_or(row.period),
            period: row.period,
            priority: row.priority.unwrap_or(0),
            component_id: row.component_id,
        };

        cores[core_idx].components[comp_idx].tasks.push(task);
    }

    Ok(System { cores })
}

fn read_rows<T>(path: &Path) -> Result<impl Iterator<Item = Result<T, EngineError>>, EngineError>
where
    T: for<'de> Deserialize<'de>,
{
    if !path.exists() {
        return Err(EngineError::ConfigMissing { path: display(path) });
    }

    let reader = csv::Reader::from_path(path).map_err(|source| EngineError::Csv {
        path: display(path),
        source,
    })?;

    let path_for_errors: PathBuf = path.to_owned();
    Ok(reader.into_deserialize::<T>().enumerate().map(move |(index, record)| {
        record.map_err(|source| {
            // +2: one for the header row, one to make the count 1-based.
            let row = source
                .position()
                .map(|pos| pos.line().to_string())
                .unwrap_or_else(|| (index + 2).to_string());
            EngineError::ConfigMalformed {
                file: display(&path_for_errors),
                row,
                detail: source.to_string(),
            }
        })
    }))
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
fn write_file(dir: &Path, name: &str, contents: &str) {
    use std::io::Write;
    let mut f = std::fs::File::create(dir.join(name)).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
}

#[test]
fn loads_a_small_system() {
    let dir = std::env::temp_dir().join(format!("hsa-engine-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    write_file(&dir, "architecture.csv", "core_id,speed_factor\nCore1,1.0\n");
    write_file(
        &dir,
        "budgets.csv",
        "component_id,core_id,scheduler,budget,period\nC1,Core1,EDF,3,5\n",
    );
    write_file(
        &dir,
        "tasks.csv",
        "task_name,wcet,bcet,deadline,period,priority,component_id\n\
         T1,2,,,5,,C1\n\
         T2,2,,,10,,C1\n",
    );

    let system = load_system(&dir).unwrap();
    assert_eq!(system.cores.len(), 1);
    assert_eq!(system.cores[0].components.len(), 1);
    assert_eq!(system.cores[0].components[0].tasks.len(), 2);
    assert_eq!(system.cores[0].components[0].alpha, 0.6);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_is_config_missing() {
    let dir = std::env::temp_dir().join(format!("hsa-engine-test-missing-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let err = load_system(&dir).unwrap_err();
    assert!(matches!(err, EngineError::ConfigMissing { .. }));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unknown_component_reference_is_config_malformed() {
    let dir = std::env::temp_dir().join(format!("hsa-engine-test-badref-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    write_file(&dir, "architecture.csv", "core_id,speed_factor\nCore1,1.0\n");
    write_file(
        &dir,
        "budgets.csv",
        "component_id,core_id,scheduler,budget,period\nC1,Core1,EDF,3,5\n",
    );
    write_file(
        &dir,
        "tasks.csv",
        "task_name,wcet,bcet,deadline,period,priority,component_id\nT1,2,,,5,,NOPE\n",
    );

    let err = load_system(&dir).unwrap_err();
    assert!(matches!(err, EngineError::ConfigMalformed { .. }));

    std::fs::remove_dir_all(&dir).ok();
}
