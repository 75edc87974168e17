use crate::config::ExplainConfig;
use crate::error::ServiceError;
use crate::TextGenerator;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    #[serde(default)]
    generated_text: String,
}

/// Text-generation endpoint speaking the hosted inference protocol: POST `{inputs, parameters}`,
/// answer `[{"generated_text": ...}]`.
#[derive(Debug)]
pub struct RemoteGenerator {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
    max_new_tokens: u32,
    temperature: f32,
}

impl RemoteGenerator {
    pub fn new(cfg: &ExplainConfig) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(cfg.timeout).build()?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            api_token: cfg.api_token.clone(),
            max_new_tokens: cfg.max_new_tokens,
            temperature: cfg.temperature,
        })
    }
}

impl TextGenerator for RemoteGenerator {
    fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let request = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: self.max_new_tokens,
                temperature: self.temperature,
                return_full_text: false,
            },
        };

        debug!(endpoint = %self.endpoint, prompt_len = prompt.len(), "requesting explanation");
        let started = Instant::now();

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let parsed: Vec<GeneratedText> =
            serde_json::from_str(&body).map_err(|e| ServiceError::Malformed(e.to_string()))?;
        let first = parsed
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::Malformed("empty result list".to_string()))?;

        let text = first.generated_text.trim();
        if text.is_empty() {
            return Err(ServiceError::EmptyText);
        }

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            text_len = text.len(),
            "explanation received"
        );
        Ok(text.to_string())
    }
}
