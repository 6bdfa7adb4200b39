use std::path::Path;
use std::sync::Arc;

use flowrun_core::validate_graph;
use flowrun_exec::executor::events::{EventSink, NoOpEventSink, StdoutEventSink};
use flowrun_exec::{Engine, ExecutionError};
use tokio_util::sync::CancellationToken;

use super::config::{apply_condition, build_engine_config, load_inputs, merge_set_inputs};
use crate::exit_codes;
use crate::output::{print_error, print_result};
use crate::utils::load_workflow;
use crate::{ConditionArgs, EngineArgs, EventsMode, OutputArgs};

#[allow(clippy::too_many_arguments)]
pub async fn run_cmd(
    path: &Path,
    inputs_path: Option<&Path>,
    set_inputs: &[String],
    condition: ConditionArgs,
    no_validate: bool,
    events: EventsMode,
    engine: EngineArgs,
    output: OutputArgs,
) -> i32 {
    let graph = match load_workflow(path, &output) {
        Ok(parsed) => parsed.into_graph(),
        Err(code) => return code,
    };

    if !no_validate {
        if let Err(err) = validate_graph(&graph) {
            print_error(output.format, output.quiet, "workflow validation failed");
            if !output.quiet {
                for v in &err.violations {
                    eprintln!("- {}: {}", v.path, v.message);
                }
            }
            return exit_codes::VALIDATION_FAILED;
        }
    }

    let mut input = match load_inputs(inputs_path) {
        Ok(i) => i,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };
    merge_set_inputs(&mut input, set_inputs);
    apply_condition(&mut input, &condition);

    let event_sink: Arc<dyn EventSink> = match events {
        EventsMode::None => Arc::new(NoOpEventSink),
        EventsMode::Stdout => Arc::new(StdoutEventSink),
    };
    let engine = Engine::new(build_engine_config(&engine), event_sink);

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling run");
            on_ctrl_c.cancel();
        }
    });

    let result = engine.run_with_cancel(&graph, &input, &cancel).await;
    cancel.cancel();

    match result {
        Ok(result) => {
            print_result(output.format, output.quiet, &result);
            if result.is_success() {
                exit_codes::SUCCESS
            } else {
                exit_codes::RUN_FAILED
            }
        }
        Err(err @ ExecutionError::NoStartNode) => {
            print_error(output.format, output.quiet, &err.to_string());
            exit_codes::VALIDATION_FAILED
        }
    }
}
