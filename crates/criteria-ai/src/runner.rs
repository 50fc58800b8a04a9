use criteria_core::suggest::{build_prompt, parse_provider_output, ProviderOutput, SuggestionContext};
use criteria_core::tracker::Issue;

use crate::client::GatewayClient;
use crate::Result;

/// Ask the gateway for suggestions on `issue`.
///
/// A reply that is not the expected JSON still succeeds as
/// [`ProviderOutput::RawText`]; only transport and gateway failures are
/// errors, so callers can fall back to the built-in baseline on `Err`.
pub async fn generate_suggestions(
    client: &GatewayClient,
    issue: &Issue,
    ctx: &SuggestionContext,
) -> Result<ProviderOutput> {
    let prompt = build_prompt(issue, ctx);
    let text = client.complete(&prompt).await?;
    let output = parse_provider_output(&text);
    if let ProviderOutput::Structured(list) = &output {
        tracing::info!(key = %issue.key, count = list.len(), "provider suggestions parsed");
    }
    Ok(output)
}
