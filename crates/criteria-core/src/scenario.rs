use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GherkinScenario
// ---------------------------------------------------------------------------

/// One Given/When/Then acceptance-criteria scenario.
///
/// `and` holds continuation steps that appeared before any given/when/then
/// step and could not be attributed to a section; `but` holds every `Pero`
/// step regardless of position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GherkinScenario {
    #[serde(default = "new_scenario_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub given: Vec<String>,
    #[serde(default)]
    pub when: Vec<String>,
    #[serde(default)]
    pub then: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub and: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub but: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl GherkinScenario {
    /// Create an empty scenario with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_scenario_id(),
            title: title.into(),
            given: Vec::new(),
            when: Vec::new(),
            then: Vec::new(),
            and: Vec::new(),
            but: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// True when the scenario has no steps in any bucket.
    pub fn is_empty(&self) -> bool {
        self.step_count() == 0
    }

    pub fn step_count(&self) -> usize {
        self.given.len() + self.when.len() + self.then.len() + self.and.len() + self.but.len()
    }
}

/// Opaque scenario id. Never derived from content, so two scenarios with
/// identical text stay distinguishable.
pub fn new_scenario_id() -> String {
    format!("scenario-{}", uuid::Uuid::new_v4().simple())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
