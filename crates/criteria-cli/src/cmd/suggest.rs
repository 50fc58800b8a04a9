use crate::output::{print_json, print_table, truncate};
use anyhow::Context;
use clap::Args;
use criteria_core::suggest::Suggestion;
use criteria_core::tracker::Issue;
use std::path::{Path, PathBuf};

/// Key used for stories that do not come from the tracker.
const LOCAL_KEY: &str = "LOCAL";

#[derive(Args)]
pub struct SuggestArgs {
    /// One-line story summary
    #[arg(long)]
    pub summary: String,

    /// File with the story description and any existing scenarios
    #[arg(long)]
    pub description: Option<PathBuf>,

    /// Supporting document to use as context (repeatable)
    #[arg(long = "context", value_name = "FILE")]
    pub context: Vec<PathBuf>,

    /// Skip the AI gateway and use the built-in suggestions
    #[arg(long)]
    pub offline: bool,
}

pub fn run(root: &Path, args: SuggestArgs, json: bool) -> anyhow::Result<()> {
    let cfg = super::load_config(root)?;
    let description = match &args.description {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => String::new(),
    };
    let issue = Issue::new(LOCAL_KEY, args.summary, description);
    let ctx = super::load_context(root, &args.context)?;

    let suggestions = super::collect_suggestions(&cfg, &issue, &ctx, args.offline)?;
    print_suggestions(&suggestions, json)
}

pub(crate) fn print_suggestions(suggestions: &[Suggestion], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&suggestions);
    }
    if suggestions.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }

    let rows = suggestions
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.category.to_string(),
                s.priority.to_string(),
                format!("{:.2}", s.confidence),
                s.suggested_scenarios().len().to_string(),
                truncate(&s.title, 56),
            ]
        })
        .collect();
    print_table(
        &["ID", "CATEGORY", "PRIORITY", "CONF", "SCENARIOS", "TITLE"],
        rows,
    );
    Ok(())
}
