mod common;
mod config;
mod document;
mod edge;
mod graph;
mod input;
mod node;

pub use common::*;
pub use config::*;
pub use document::*;
pub use edge::*;
pub use graph::*;
pub use input::*;
pub use node::*;
