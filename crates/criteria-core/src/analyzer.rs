use crate::scenario::GherkinScenario;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Substring that marks a given step as too generic about the actor.
const GENERIC_ACTOR: &str = "usuario";

// ---------------------------------------------------------------------------
// IssueKind / HintKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingGiven,
    MissingWhen,
    MissingThen,
    UnclearStep,
    DuplicateScenario,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::MissingGiven => "missing_given",
            IssueKind::MissingWhen => "missing_when",
            IssueKind::MissingThen => "missing_then",
            IssueKind::UnclearStep => "unclear_step",
            IssueKind::DuplicateScenario => "duplicate_scenario",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    ImproveStep,
    AddScenario,
    SplitScenario,
    AddExamples,
}

impl HintKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HintKind::ImproveStep => "improve_step",
            HintKind::AddScenario => "add_scenario",
            HintKind::SplitScenario => "split_scenario",
            HintKind::AddExamples => "add_examples",
        }
    }
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub message: String,
    pub scenario_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinHint {
    #[serde(rename = "type")]
    pub kind: HintKind,
    pub message: String,
    pub scenario_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinAnalysis {
    pub is_valid_gherkin: bool,
    pub scenarios: Vec<GherkinScenario>,
    pub issues: Vec<GherkinIssue>,
    pub suggestions: Vec<GherkinHint>,
}

impl GherkinAnalysis {
    pub fn issues_for<'a>(&'a self, scenario_id: &'a str) -> impl Iterator<Item = &'a GherkinIssue> {
        self.issues.iter().filter(move |i| i.scenario_id == scenario_id)
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Structural report over `scenarios`. Pure: never mutates and never fails.
///
/// `is_valid_gherkin` only reflects `issues`; hints are advisory.
pub fn analyze(scenarios: &[GherkinScenario]) -> GherkinAnalysis {
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    for scenario in scenarios {
        let sections = [
            (&scenario.given, IssueKind::MissingGiven, "Given"),
            (&scenario.when, IssueKind::MissingWhen, "When"),
            (&scenario.then, IssueKind::MissingThen, "Then"),
        ];
        for (steps, kind, label) in sections {
            if steps.is_empty() {
                issues.push(GherkinIssue {
                    kind,
                    message: format!(
                        "El escenario \"{}\" no tiene pasos '{}'",
                        scenario.title, label
                    ),
                    scenario_id: scenario.id.clone(),
                });
            }
        }

        if scenario.given.iter().any(|step| step.contains(GENERIC_ACTOR)) {
            suggestions.push(GherkinHint {
                kind: HintKind::ImproveStep,
                message: "Considera ser más específico sobre el tipo de usuario".to_string(),
                scenario_id: scenario.id.clone(),
            });
        }
    }

    GherkinAnalysis {
        is_valid_gherkin: issues.is_empty(),
        scenarios: scenarios.to_vec(),
        issues,
        suggestions,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
