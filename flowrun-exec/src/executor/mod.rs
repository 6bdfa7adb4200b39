mod engine;
pub mod events;
mod handlers;
pub mod http;
mod interrupt;
pub mod lookup;
mod result;
mod step;
pub mod template;
mod types;
mod vars;

pub use engine::Engine;
pub use events::{CompositeEventSink, Event, EventSink, NoOpEventSink, StdoutEventSink};
pub use handlers::HandlerError;
pub use http::{HttpClient, HttpError, HttpResponse, ReqwestHttpClient};
pub use result::{ExecutionError, ExecutionResult, RunStatus};
pub use step::{ExecutionStep, StepStatus};
pub use types::EngineConfig;
pub use vars::{Variables, CITY, CONDITION_MET, EMAIL, TEMPERATURE};
