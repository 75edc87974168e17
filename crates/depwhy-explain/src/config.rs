use std::fmt;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models/gpt2";

#[derive(Clone, PartialEq)]
pub struct ExplainConfig {
    pub use_external_service: bool,
    pub endpoint: String,
    pub timeout: Duration,
    pub max_new_tokens: u32,
    pub temperature: f32,
    /// Explain issues concurrently. Output order is unaffected.
    pub parallel: bool,
    /// Sent as a bearer token when present.
    pub api_token: Option<String>,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            use_external_service: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
            max_new_tokens: 200,
            temperature: 0.7,
            parallel: true,
            api_token: None,
        }
    }
}

impl fmt::Debug for ExplainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplainConfig")
            .field("use_external_service", &self.use_external_service)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("max_new_tokens", &self.max_new_tokens)
            .field("temperature", &self.temperature)
            .field("parallel", &self.parallel)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
