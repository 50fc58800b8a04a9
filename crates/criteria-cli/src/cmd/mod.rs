pub mod analyze;
pub mod config;
pub mod format;
pub mod init;
pub mod issue;
pub mod knowledge;
pub mod parse;
pub mod suggest;

use anyhow::Context;
use criteria_ai::{generate_suggestions, GatewayClient};
use criteria_core::config::Config;
use criteria_core::knowledge::{ContextFile, KnowledgeBase};
use criteria_core::suggest::{suggestions_or_baseline, synthesize, Suggestion, SuggestionContext};
use criteria_core::tracker::Issue;
use criteria_core::types::Dialect;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file values with environment overrides applied.
pub(crate) fn load_config(root: &Path) -> anyhow::Result<Config> {
    let cfg = Config::load(root).context("failed to load config")?;
    Ok(cfg.with_env())
}

pub(crate) fn resolve_dialect(cfg: &Config, flag: Option<Dialect>) -> Dialect {
    flag.unwrap_or(cfg.dialect)
}

/// Context files from the command line plus the whole knowledge base.
pub(crate) fn load_context(root: &Path, files: &[PathBuf]) -> anyhow::Result<SuggestionContext> {
    let files = files
        .iter()
        .map(|p| ContextFile::from_path(p).with_context(|| format!("failed to read {}", p.display())))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let knowledge = KnowledgeBase::load(root)
        .context("failed to load knowledge base")?
        .items;
    Ok(SuggestionContext::new(files, knowledge))
}

/// Suggestions from the gateway when configured and reachable, otherwise the
/// built-in baseline.
pub(crate) fn collect_suggestions(
    cfg: &Config,
    issue: &Issue,
    ctx: &SuggestionContext,
    offline: bool,
) -> anyhow::Result<Vec<Suggestion>> {
    if offline || !cfg.gateway.is_configured() {
        tracing::info!(offline, "using baseline suggestions");
        return Ok(synthesize(issue, ctx));
    }

    let client = GatewayClient::from_config(&cfg.gateway)?;
    let limit = Duration::from_secs(cfg.gateway.timeout_secs);
    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(async {
        match tokio::time::timeout(limit, generate_suggestions(&client, issue, ctx)).await {
            Ok(res) => res.map_err(|e| e.to_string()),
            Err(_) => Err(format!("timed out after {}s", limit.as_secs())),
        }
    });
    Ok(suggestions_or_baseline(result, issue, ctx))
}
