use std::path::Path;

use flowrun_core::{parse_workflow_str, DocumentFormat, ParsedWorkflow};

use crate::exit_codes;
use crate::output::print_error;
use crate::OutputArgs;

/// Read and parse a graph document, reporting failures and mapping them to an exit code.
pub fn load_workflow(path: &Path, output: &OutputArgs) -> Result<ParsedWorkflow, i32> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to read {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })?;

    parse_workflow_str(&content, DocumentFormat::Auto).map_err(|e| {
        print_error(output.format, output.quiet, &e.to_string());
        exit_codes::VALIDATION_FAILED
    })
}
