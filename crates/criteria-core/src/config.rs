use crate::error::{CriteriaError, Result};
use crate::paths;
use crate::types::Dialect;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// TrackerConfig
// ---------------------------------------------------------------------------

/// Issue-tracker REST credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl TrackerConfig {
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.user_email.is_some() && self.api_token.is_some()
    }
}

// ---------------------------------------------------------------------------
// GatewayConfig
// ---------------------------------------------------------------------------

/// AI gateway used as the external suggestion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_gateway_url() -> String {
    "https://gateway.ai.cloudflare.com/v1".to_string()
}

fn default_provider() -> String {
    "mistral".to_string()
}

fn default_model() -> String {
    "mistral-large-latest".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_url(),
            account_id: None,
            gateway_name: None,
            api_key: None,
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    pub fn is_configured(&self) -> bool {
        self.account_id.is_some() && self.gateway_name.is_some()
    }

    /// Chat-completions endpoint routed through the gateway.
    pub fn endpoint(&self) -> Result<String> {
        let (Some(account), Some(gateway)) = (&self.account_id, &self.gateway_name) else {
            return Err(CriteriaError::MissingConfig(
                "gateway.account_id and gateway.gateway_name".to_string(),
            ));
        };
        Ok(format!(
            "{}/{}/{}/{}/v1/chat/completions",
            self.base_url.trim_end_matches('/'),
            account,
            gateway,
            self.provider
        ))
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub dialect: Dialect,
}

impl Config {
    /// Load `.criteria/config.yaml`; a missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Config::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Apply the process environment on top of the file values.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; empty values are ignored.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = get("JIRA_BASE_URL") {
            self.tracker.base_url = Some(v);
        }
        if let Some(v) = get("JIRA_USER_EMAIL") {
            self.tracker.user_email = Some(v);
        }
        if let Some(v) = get("JIRA_API_TOKEN") {
            self.tracker.api_token = Some(v);
        }
        if let Some(v) = get("CLOUDFLARE_ACCOUNT_ID") {
            self.gateway.account_id = Some(v);
        }
        if let Some(v) = get("CLOUDFLARE_AI_GATEWAY_NAME") {
            self.gateway.gateway_name = Some(v);
        }
        if let Some(v) = get("CLOUDFLARE_API_KEY") {
            self.gateway.api_key = Some(v);
        }
        self
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if !self.tracker.is_configured() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "tracker configuration is incomplete: set tracker.base_url, \
                          tracker.user_email and tracker.api_token (or JIRA_* variables)"
                    .to_string(),
            });
        }

        if !self.gateway.is_configured() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "AI gateway is not configured: suggestions use the built-in baseline"
                    .to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.gateway.temperature) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "gateway.temperature {} is outside 0.0..=2.0",
                    self.gateway.temperature
                ),
            });
        }

        if self.gateway.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "gateway.timeout_secs must be greater than zero".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
