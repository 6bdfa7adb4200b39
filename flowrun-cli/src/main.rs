use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;
mod utils;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "flowrun", version, about = "Workflow graph executor")]
struct Cli {
    /// Log filter (e.g. `info`, `flowrun_exec=debug`). Falls back to RUST_LOG, then `warn`.
    #[arg(long, global = true, env = "FLOWRUN_LOG")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

/// Logs go to stderr so stdout stays machine readable.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Run {
            path,
            inputs,
            set_inputs,
            condition,
            no_validate,
            events,
            engine,
            output,
        } => {
            cmd::run::run_cmd(
                &path,
                inputs.as_deref(),
                &set_inputs,
                condition,
                no_validate,
                events,
                engine,
                output,
            )
            .await
        }
        Command::Validate { path, output } => cmd::validate::validate_cmd(&path, output).await,
        Command::Inspect { path, output } => cmd::inspect::inspect_cmd(&path, output).await,
    }
}
