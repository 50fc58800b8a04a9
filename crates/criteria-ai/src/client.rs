use criteria_core::config::GatewayConfig;
use criteria_core::suggest::Prompt;

use crate::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::{GatewayError, Result};

// ─── GatewayClient ────────────────────────────────────────────────────────

/// Chat-completion client routed through the AI gateway.
///
/// One request per call, no retries. Callers bound the wait with their own
/// timeout.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GatewayClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        let defaults = GatewayConfig::default();
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
            model: defaults.model,
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
        }
    }

    /// Build from the `gateway` config section.
    ///
    /// Fails with [`GatewayError::NotConfigured`] when the account or gateway
    /// name is missing.
    pub fn from_config(cfg: &GatewayConfig) -> Result<Self> {
        let endpoint = cfg
            .endpoint()
            .map_err(|e| GatewayError::NotConfigured(e.to_string()))?;
        Ok(Self::new(endpoint, cfg.api_key.clone())
            .with_model(cfg.model.clone())
            .with_sampling(cfg.temperature, cfg.max_tokens))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_for(&self, prompt: &Prompt) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(prompt.system.clone()),
                ChatMessage::user(prompt.user.clone()),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Send `prompt` and return the first choice's text.
    pub async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let body = self.request_for(prompt);
        tracing::info!(endpoint = %self.endpoint, model = %self.model, "requesting completion");

        let mut req = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send().await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            tracing::warn!(%status, "gateway request failed");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)?;
        if let Some(usage) = &parsed.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion usage"
            );
        }
        parsed
            .text()
            .map(str::to_string)
            .ok_or(GatewayError::EmptyResponse)
    }
}
