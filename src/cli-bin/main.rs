use hsa_engine::prelude::*;

pub mod args;

use args::Args;

fn main() {
    let args = match <Args as clap::Parser>::try_parse() {
        Ok(args) => args,
        Err(err) => {
            use clap::error::ErrorKind::*;

            let exit_code = match err.kind() {
                DisplayHelp | DisplayHelpOnMissingArgumentOrSubcommand | DisplayVersion => 0,
                _ => 2,
            };

            err.print().unwrap();
            std::process::exit(exit_code);
        }
    };

    let output_dir = args
        .output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."))
        .to_owned();

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let _logging = hsa_engine::logging::init(&output_dir, timestamp, args.quiet)
        .unwrap_or_else(|err| {
            eprintln!("failed to initialize logging: {err}");
            std::process::exit(2);
        });

    match run(&args) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            tracing::error!(%err, "run failed");
            eprintln!("{err}");
            let exit_code = match err {
                EngineError::ConfigMissing { .. } => 1,
                _ => 2,
            };
            std::process::exit(exit_code);
        }
    }
}

fn run(args: &Args) -> Result<(), EngineError> {
    tracing::info!(input_dir = %args.input_dir.display(), "loading system model");
    let mut system = hsa_engine::io::load_system(&args.input_dir)?;

    for core in system.cores.iter() {
        tracing::debug!(core = %core.name, speed = core.speed, components = core.components.len(), "core loaded");
    }

    if args.reassign_cores {
        hsa_engine::reassign::advise_reassignments(&system);
    }

    for comp in system.components_mut() {
        let outcome = find_min_bdr_params(&comp.tasks, comp.scheduler, args.horizon);
        match outcome {
            BdrOutcome::Found { alpha, delta } => {
                tracing::info!(component = %comp.name, alpha, delta, "synthesized BDR interface");
                comp.alpha = alpha;
                comp.delta = delta;
            }
            BdrOutcome::Infeasible => {
                tracing::warn!(component = %comp.name, horizon = args.horizon, "no BDR interface found within horizon");
            }
        }
    }

    for core in &system.cores {
        let children: Vec<(f64, f64)> = core.components.iter().map(|comp| (comp.alpha, comp.delta)).collect();
        let (passes, derived) = validate_theorem1(&children, 1.0, 0.0);
        if passes {
            tracing::info!(core = %core.name, total_alpha = derived.alpha, "core passes composition check");
        } else {
            tracing::warn!(core = %core.name, total_alpha = derived.alpha, "core fails composition check");
        }
    }

    let outcome = simulate(&system, args.sim_time);
    let report = build_report(&system, &outcome);

    tracing::info!(schedulable = report.schedulable, "simulation complete");

    hsa_engine::io::write_solution_csv(&report, &args.output)?;
    tracing::info!(output = %args.output.display(), "wrote solution");

    Ok(())
}
