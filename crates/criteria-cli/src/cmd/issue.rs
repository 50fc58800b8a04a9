use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use criteria_core::formatter::format_scenarios;
use criteria_core::jira::JiraClient;
use criteria_core::session::EditSession;
use criteria_core::tracker::{Issue, IssueTracker};
use criteria_core::types::Dialect;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum IssueSubcommand {
    /// Fetch an issue and show its acceptance criteria
    Show {
        /// Issue key, e.g. PROJ-123
        key: String,
    },

    /// Suggest improvements for an issue's acceptance criteria
    Suggest {
        key: String,
        /// Supporting document to use as context (repeatable)
        #[arg(long = "context", value_name = "FILE")]
        context: Vec<PathBuf>,
        /// Skip the AI gateway and use the built-in suggestions
        #[arg(long)]
        offline: bool,
    },

    /// Apply suggestions and push the merged criteria back to the tracker
    Apply {
        key: String,
        /// Suggestion id to apply (repeatable, in order)
        #[arg(long = "suggestion", value_name = "ID", required = true)]
        suggestions: Vec<String>,
        #[arg(long = "context", value_name = "FILE")]
        context: Vec<PathBuf>,
        #[arg(long)]
        offline: bool,
        /// Print what would be sent without touching the tracker
        #[arg(long)]
        dry_run: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(
    root: &Path,
    subcmd: IssueSubcommand,
    dialect: Option<Dialect>,
    json: bool,
) -> anyhow::Result<()> {
    let cfg = super::load_config(root)?;
    let dialect = super::resolve_dialect(&cfg, dialect);
    let tracker = JiraClient::from_config(&cfg.tracker).context("tracker is not configured")?;

    match subcmd {
        IssueSubcommand::Show { key } => show(&tracker, &key, dialect, json),
        IssueSubcommand::Suggest {
            key,
            context,
            offline,
        } => {
            let issue = fetch(&tracker, &key)?;
            let ctx = super::load_context(root, &context)?;
            let suggestions = super::collect_suggestions(&cfg, &issue, &ctx, offline)?;
            super::suggest::print_suggestions(&suggestions, json)
        }
        IssueSubcommand::Apply {
            key,
            suggestions,
            context,
            offline,
            dry_run,
        } => {
            let issue = fetch(&tracker, &key)?;
            let ctx = super::load_context(root, &context)?;
            let available = super::collect_suggestions(&cfg, &issue, &ctx, offline)?;
            let mut session = EditSession::new(issue);
            for id in &suggestions {
                let suggestion = available
                    .iter()
                    .find(|s| &s.id == id)
                    .with_context(|| format!("suggestion not found: {id}"))?;
                let added = session.apply_suggestion(suggestion);
                if !json {
                    println!("Applied {id}: {} (+{added} scenario(s))", suggestion.title);
                }
            }
            if dry_run {
                dry_run_report(&session, dialect, json)
            } else {
                sync(&mut session, &tracker, dialect, json)
            }
        }
    }
}

fn fetch(tracker: &dyn IssueTracker, key: &str) -> anyhow::Result<Issue> {
    tracker
        .fetch_issue(key)
        .with_context(|| format!("failed to fetch issue '{key}'"))
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(tracker: &dyn IssueTracker, key: &str, dialect: Dialect, json: bool) -> anyhow::Result<()> {
    let issue = fetch(tracker, key)?;
    let session = EditSession::new(issue);
    let analysis = session.analysis();
    let issue = session.current();

    if json {
        return print_json(&serde_json::json!({
            "issue": issue,
            "analysis": analysis,
        }));
    }

    println!("{}: {}", issue.key, issue.summary);
    print_table(
        &["TYPE", "STATUS", "PRIORITY", "POINTS", "ASSIGNEE"],
        vec![vec![
            issue.issue_type.clone(),
            issue.status.clone(),
            issue.priority.clone(),
            issue.story_points.to_string(),
            issue.assignee.clone().unwrap_or_else(|| "-".to_string()),
        ]],
    );
    if let Some(story) = &issue.user_story {
        println!("\nUser story: {story}");
    }

    if issue.acceptance_criteria.is_empty() {
        println!("\nNo acceptance criteria found.");
        return Ok(());
    }
    println!("\n{}", format_scenarios(&issue.acceptance_criteria, dialect));
    for problem in &analysis.issues {
        println!("[{}] {}", problem.kind, problem.message);
    }
    for hint in &analysis.suggestions {
        println!("[hint:{}] {}", hint.kind, hint.message);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

fn dry_run_report(session: &EditSession, dialect: Dialect, json: bool) -> anyhow::Result<()> {
    let payload = session.sync_payload(dialect);
    if json {
        return print_json(&payload);
    }
    println!("\n--- description ---\n{}", payload.description);
    if let Some(comment) = &payload.comment {
        println!("--- comment ---\n{comment}");
    }
    Ok(())
}

fn sync(
    session: &mut EditSession,
    tracker: &dyn IssueTracker,
    dialect: Dialect,
    json: bool,
) -> anyhow::Result<()> {
    if !session.has_changes() {
        println!("Nothing to sync.");
        return Ok(());
    }
    let key = session.current().key.clone();
    let issue = session
        .sync(tracker, dialect)
        .with_context(|| format!("failed to sync issue '{key}'"))?;

    if json {
        print_json(issue)
    } else {
        println!(
            "Synced {}: {} scenario(s) in the tracker.",
            issue.key,
            issue.acceptance_criteria.len()
        );
        Ok(())
    }
}
