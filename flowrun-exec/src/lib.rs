#![forbid(unsafe_code)]

//! Breadth-first execution engine for workflow graphs.
//!
//! Graph parsing and validation live in `flowrun-core`; this crate walks a [`Graph`],
//! dispatches every reachable node to its handler and returns the ordered step trace.
//!
//! [`Graph`]: flowrun_core::Graph

pub mod executor;

pub use crate::executor::{
    Engine, EngineConfig, ExecutionError, ExecutionResult, ExecutionStep, RunStatus, StepStatus,
    Variables,
};
