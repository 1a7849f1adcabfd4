//! Writes the solution report out as `solution.csv`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::report::SolutionReport;

#[cfg(test)]
use crate::report::{ComponentReport, TaskReport};

#[derive(Debug, Serialize, Deserialize)]
struct SolutionRow {
    task_name: String,
    component_id: String,
    task_schedulable: u8,
    avg_response_time: f64,
    max_response_time: f64,
    component_schedulable: u8,
}

/// Write `report` to `path` as CSV, one row per task, in the report's task
/// order. Creates parent directories if needed.
pub fn write_solution_csv(report: &SolutionReport, path: &Path) -> Result<(), EngineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| EngineError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let component_schedulable: HashMap<&str, bool> = report
        .components
        .iter()
        .map(|comp| (comp.component.as_str(), comp.schedulable))
        .collect();

    let mut writer = csv::Writer::from_path(path).map_err(|source| EngineError::Csv {
        path: path.display().to_string(),
        source,
    })?;

    for task in &report.tasks {
        let component_ok = component_schedulable.get(task.component.as_str()).copied().unwrap_or(false);
        writer
            .serialize(SolutionRow {
                task_name: task.task.clone(),
                component_id: task.component.clone(),
                task_schedulable: task.schedulable as u8,
                avg_response_time: round2(task.avg_response_time),
                max_response_time: round2(task.max_response_time),
                component_schedulable: component_ok as u8,
            })
            .map_err(|source| EngineError::Csv {
                path: path.display().to_string(),
                source,
            })?;
    }

    writer.flush().map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[test]
fn writes_one_row_per_task() {
    let report = SolutionReport {
        tasks: vec![TaskReport {
            task: "T1".into(),
            component: "C1".into(),
            avg_response_time: 3.456,
            max_response_time: 4.001,
            schedulable: true,
        }],
        components: vec![ComponentReport {
            component: "C1".into(),
            core: "Core1".into(),
            alpha: 0.5,
            delta: 1.0,
            schedulable: true,
            excluded: false,
        }],
        schedulable: true,
    };

    let dir = std::env::temp_dir().join(format!("hsa-engine-out-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("solution.csv");

    write_solution_csv(&report, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let row: SolutionRow = reader.deserialize().next().unwrap().unwrap();
    assert_eq!(row.task_name, "T1");
    assert_eq!(row.task_schedulable, 1);
    assert_eq!(row.avg_response_time, 3.46);
    assert_eq!(row.max_response_time, 4.0);
    assert_eq!(row.component_schedulable, 1);

    std::fs::remove_dir_all(&dir).ok();
}
