//! `criteria-ai`: client for the external suggestion provider.
//!
//! The provider is an OpenAI-compatible chat-completions endpoint reached
//! through an AI gateway (`{base}/{account}/{gateway}/{provider}/v1/chat/completions`).
//! This crate only moves text over the wire; prompt construction and reply
//! normalization live in `criteria_core::suggest` so the baseline and the
//! provider share one suggestion model.
//!
//! # Architecture
//!
//! ```text
//! Issue + SuggestionContext
//!     │
//!     ▼
//! build_prompt        ← criteria_core::suggest
//!     │
//!     ▼
//! GatewayClient       ← POST chat/completions, bearer auth
//!     │                  first choice's text
//!     ▼
//! parse_provider_output → ProviderOutput::{Structured, RawText}
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use criteria_ai::{generate_suggestions, GatewayClient};
//! use criteria_core::suggest::{suggestions_or_baseline, SuggestionContext};
//!
//! let client = GatewayClient::from_config(&config.gateway)?;
//! let ctx = SuggestionContext::default();
//! let result = generate_suggestions(&client, &issue, &ctx).await;
//! let suggestions = suggestions_or_baseline(result, &issue, &ctx);
//! ```

pub mod client;
pub mod error;
pub mod runner;
pub mod types;


pub use client::GatewayClient;
pub use error::GatewayError;
pub use runner::generate_suggestions;
pub use types::{ChatMessage, ChatRequest, ChatResponse, Choice, Role, TokenUsage};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, GatewayError>;
