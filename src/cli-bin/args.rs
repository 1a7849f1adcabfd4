const DEFAULT_AFTER_HELP: &str = "Refer to the crate's documentation for further help";

#[derive(clap::Parser, Debug)]
#[command(after_help = DEFAULT_AFTER_HELP)]
pub struct Args {
    /// Directory containing tasks.csv, architecture.csv and budgets.csv
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: std::path::PathBuf,

    /// Path to the output solution CSV
    #[arg(long, value_name = "PATH", default_value = "./Output/solution.csv")]
    pub output: std::path::PathBuf,

    /// Horizon H for BDR interface synthesis, in ticks
    #[arg(long, value_name = "H", default_value_t = hsa_engine::bdr::DEFAULT_HORIZON)]
    pub horizon: u64,

    /// Simulation length, in ticks. Defaults to the task set's hyperperiod
    #[arg(long, value_name = "TICKS")]
    pub sim_time: Option<u64>,

    /// Suppress the console mirror of the run log (the file log still runs)
    #[arg(short = 'q', long, default_value = "false", action = clap::ArgAction::SetTrue)]
    pub quiet: bool,

    /// Advise core reassignments for components that fail composition
    #[arg(long, default_value = "false", action = clap::ArgAction::SetTrue)]
    pub reassign_cores: bool,
}
