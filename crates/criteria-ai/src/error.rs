use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("AI gateway is not configured: {0}")]
    NotConfigured(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("gateway returned no completion text")]
    EmptyResponse,

    #[error("failed to parse gateway response: {0}")]
    Parse(#[from] serde_json::Error),
}
