use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute a workflow graph and print the step trace.
    Run {
        path: PathBuf,
        /// JSON or YAML file holding `formData` and `condition`.
        #[arg(long)]
        inputs: Option<PathBuf>,
        /// Form value; VALUE is parsed as JSON, falling back to a plain string.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set_inputs: Vec<String>,
        #[command(flatten)]
        condition: ConditionArgs,
        /// Execute even when the graph fails validation.
        #[arg(long)]
        no_validate: bool,
        #[arg(long, value_enum, default_value_t = EventsMode::None, env = "FLOWRUN_EVENTS")]
        events: EventsMode,
        #[command(flatten)]
        engine: EngineArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check a workflow graph for structural and metadata problems.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show nodes, edges and what is reachable from the start node.
    Inspect {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}
