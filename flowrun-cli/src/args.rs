use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "FLOWRUN_FORMAT")]
    pub format: OutputFormat,
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct EngineArgs {
    /// Per-request timeout for integration calls, in milliseconds.
    #[arg(long, default_value_t = 30_000, env = "FLOWRUN_HTTP_TIMEOUT")]
    pub http_timeout: u64,
    #[arg(long, default_value_t = 4_194_304, env = "FLOWRUN_MAX_RESPONSE_BYTES")]
    pub max_response_bytes: usize,
    /// Wall-clock budget for the whole run, in milliseconds.
    #[arg(long, env = "FLOWRUN_RUN_TIMEOUT")]
    pub run_timeout: Option<u64>,
    /// Sender for email nodes without a `from` override.
    #[arg(long, env = "FLOWRUN_SENDER")]
    pub sender: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ConditionArgs {
    /// Comparison used by condition nodes (greater_than, less_than, equals, ...).
    #[arg(long, requires = "threshold")]
    pub operator: Option<String>,
    #[arg(long, requires = "operator", allow_hyphen_values = true)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EventsMode {
    None,
    Stdout,
}
