use std::time::Duration;

pub const DEFAULT_SENDER: &str = "weather-alerts@example.com";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Per-request timeout for integration calls.
    pub http_timeout: Duration,
    pub max_response_bytes: usize,
    /// Wall-clock budget for a whole run. `None` leaves timing to the caller.
    pub run_timeout: Option<Duration>,
    /// Sender used by email nodes that don't set `from` in their metadata.
    pub default_sender: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(30),
            max_response_bytes: 4_194_304,
            run_timeout: None,
            default_sender: DEFAULT_SENDER.to_string(),
        }
    }
}
