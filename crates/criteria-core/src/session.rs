use crate::analyzer::{analyze, GherkinAnalysis};
use crate::description::compose_description;
use crate::error::{CriteriaError, Result};
use crate::scenario::GherkinScenario;
use crate::suggest::Suggestion;
use crate::tracker::{audit_comment, Issue, IssueTracker};
use crate::types::{Dialect, SuggestionCategory};
use serde::Serialize;

/// What a sync sends upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncPayload {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

// ---------------------------------------------------------------------------
// EditSession
// ---------------------------------------------------------------------------

/// Working copy of one issue's acceptance criteria.
///
/// `original` is the last state seen upstream; edits and applied suggestions
/// only touch `current` until `sync` succeeds.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: Issue,
    current: Issue,
    applied: Vec<String>,
}

impl EditSession {
    pub fn new(issue: Issue) -> Self {
        Self {
            original: issue.clone(),
            current: issue,
            applied: Vec::new(),
        }
    }

    pub fn original(&self) -> &Issue {
        &self.original
    }

    pub fn current(&self) -> &Issue {
        &self.current
    }

    pub fn scenarios(&self) -> &[GherkinScenario] {
        &self.current.acceptance_criteria
    }

    /// Titles of the suggestions applied since the last sync.
    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    pub fn has_changes(&self) -> bool {
        !self.applied.is_empty() || self.current != self.original
    }

    pub fn add_scenario(&mut self, title: impl Into<String>) -> &GherkinScenario {
        let criteria = &mut self.current.acceptance_criteria;
        criteria.push(GherkinScenario::new(title));
        &criteria[criteria.len() - 1]
    }

    /// Replace the scenario with the same id.
    pub fn update_scenario(&mut self, scenario: GherkinScenario) -> Result<()> {
        let slot = self
            .current
            .acceptance_criteria
            .iter_mut()
            .find(|s| s.id == scenario.id)
            .ok_or_else(|| CriteriaError::ScenarioNotFound(scenario.id.clone()))?;
        *slot = scenario;
        Ok(())
    }

    pub fn remove_scenario(&mut self, id: &str) -> Result<GherkinScenario> {
        let pos = self
            .current
            .acceptance_criteria
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CriteriaError::ScenarioNotFound(id.to_string()))?;
        Ok(self.current.acceptance_criteria.remove(pos))
    }

    /// Append the suggestion's scenarios and record its title for the audit
    /// comment. Returns how many scenarios were added.
    pub fn apply_suggestion(&mut self, suggestion: &Suggestion) -> usize {
        let added = suggestion.suggested_scenarios();
        let count = added.len();
        self.current.acceptance_criteria.extend(added);

        if suggestion.category == SuggestionCategory::UserStoryFormat {
            let description = format!(
                "{}\n\nMejora aplicada: {}",
                self.current.free_text(),
                suggestion.description
            );
            self.current.description = description;
        }

        self.applied.push(suggestion.title.clone());
        tracing::info!(id = %suggestion.id, scenarios = count, "applied suggestion");
        count
    }

    /// Drop every local edit.
    pub fn revert(&mut self) {
        self.current = self.original.clone();
        self.applied.clear();
    }

    pub fn analysis(&self) -> GherkinAnalysis {
        analyze(&self.current.acceptance_criteria)
    }

    pub fn sync_payload(&self, dialect: Dialect) -> SyncPayload {
        SyncPayload {
            description: compose_description(
                self.current.free_text(),
                &self.current.acceptance_criteria,
                dialect,
            ),
            comment: audit_comment(&self.applied),
        }
    }

    /// Accept `issue` as the new upstream state.
    pub fn mark_synced(&mut self, issue: Issue) {
        self.original = issue.clone();
        self.current = issue;
        self.applied.clear();
    }

    /// Push the description, then the audit comment, then refetch.
    ///
    /// On error the session keeps its local edits.
    pub fn sync(&mut self, tracker: &dyn IssueTracker, dialect: Dialect) -> Result<&Issue> {
        let key = self.current.key.clone();
        let payload = self.sync_payload(dialect);
        tracker.update_description(&key, &payload.description)?;
        if let Some(comment) = &payload.comment {
            tracker.add_comment(&key, comment)?;
        }
        let refreshed = tracker.fetch_issue(&key)?;
        self.mark_synced(refreshed);
        tracing::info!(key = %key, "issue synchronized");
        Ok(&self.current)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
