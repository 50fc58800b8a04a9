//! Issue-tracker boundary: the issue model, the tracker trait, and the
//! conversion between plain text and the tracker's rich-document wrapper.

use crate::description::{extract_user_story, split_description};
use crate::error::Result;
use crate::parser::parse_scenarios;
use crate::scenario::GherkinScenario;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const AUDIT_HEADER: &str = "🤖 Sugerencias de IA aplicadas:";
const AUDIT_FOOTER: &str = "Generado por Jira AI Assistant";

// ---------------------------------------------------------------------------
// Issue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    /// Plain-text description, rich-document wrapper already removed.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub issue_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub reporter: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub story_points: f64,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_story: Option<String>,
    #[serde(default)]
    pub acceptance_criteria: Vec<GherkinScenario>,
}

fn default_priority() -> String {
    "Medium".to_string()
}

impl Issue {
    /// Build an issue from its description, deriving scenarios and user story.
    pub fn new(key: impl Into<String>, summary: impl Into<String>, description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            key: key.into(),
            summary: summary.into(),
            user_story: extract_user_story(&description),
            acceptance_criteria: parse_scenarios(&description),
            description,
            issue_type: String::new(),
            status: String::new(),
            priority: default_priority(),
            assignee: None,
            reporter: None,
            created: None,
            updated: None,
            story_points: 0.0,
            labels: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Description without the rendered acceptance-criteria block.
    pub fn free_text(&self) -> &str {
        split_description(&self.description).0
    }
}

// ---------------------------------------------------------------------------
// IssueTracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub instance: String,
}

/// Durable store for issue descriptions. Only implementations touch the
/// network; the transform stays pure.
pub trait IssueTracker {
    fn fetch_issue(&self, key: &str) -> Result<Issue>;
    fn update_description(&self, key: &str, description: &str) -> Result<()>;
    fn add_comment(&self, key: &str, body: &str) -> Result<()>;
    fn current_user(&self) -> Result<TrackerUser>;
}

// ---------------------------------------------------------------------------
// Rich-document conversion
// ---------------------------------------------------------------------------

/// Flatten a tracker rich document into plain text, one line per paragraph.
///
/// Plain strings pass through; other shapes become empty text.
pub fn document_to_text(doc: &Value) -> String {
    if let Some(s) = doc.as_str() {
        return s.to_string();
    }
    if doc.get("type").and_then(Value::as_str) != Some("doc") {
        return String::new();
    }
    let Some(blocks) = doc.get("content").and_then(Value::as_array) else {
        return String::new();
    };

    let mut text = String::new();
    for block in blocks {
        if block.get("type").and_then(Value::as_str) != Some("paragraph") {
            continue;
        }
        if let Some(inlines) = block.get("content").and_then(Value::as_array) {
            for inline in inlines {
                if inline.get("type").and_then(Value::as_str) == Some("text") {
                    if let Some(t) = inline.get("text").and_then(Value::as_str) {
                        text.push_str(t);
                    }
                }
            }
        }
        text.push('\n');
    }
    text.trim().to_string()
}

/// Wrap plain text in a single-paragraph rich document.
pub fn text_to_document(text: &str) -> Value {
    json!({
        "type": "doc",
        "version": 1,
        "content": [
            {
                "type": "paragraph",
                "content": [ { "type": "text", "text": text } ]
            }
        ]
    })
}

/// Audit comment listing applied suggestion titles, or `None` when nothing
/// was applied.
pub fn audit_comment(applied: &[String]) -> Option<String> {
    if applied.is_empty() {
        return None;
    }
    let bullets: Vec<String> = applied.iter().map(|t| format!("• {t}")).collect();
    Some(format!("{AUDIT_HEADER}\n{}\n\n{AUDIT_FOOTER}", bullets.join("\n")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_new_derives_criteria_and_story() {
        let issue = Issue::new(
            "PROJ-1",
            "Login",
            "Como usuario quiero entrar para ver datos.\nEscenario: A\n  Dado que x\n  Cuando y\n  Entonces z",
        );
        assert_eq!(issue.acceptance_criteria.len(), 1);
        assert!(issue.user_story.is_some());
        assert_eq!(issue.priority, "Medium");
    }

    #[test]
    fn document_paragraphs_become_lines() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                { "type": "paragraph", "content": [
                    { "type": "text", "text": "Escenario: " },
                    { "type": "text", "text": "Login" }
                ]},
                { "type": "rule" },
                { "type": "paragraph", "content": [
                    { "type": "text", "text": "Dado que soy admin" }
                ]}
            ]
        });
        assert_eq!(document_to_text(&doc), "Escenario: Login\nDado que soy admin");
    }

    #[test]
    fn document_edge_shapes() {
        assert_eq!(document_to_text(&json!("texto plano")), "texto plano");
        assert_eq!(document_to_text(&Value::Null), "");
        assert_eq!(document_to_text(&json!({"type": "doc"})), "");
        assert_eq!(document_to_text(&json!({"type": "other", "content": []})), "");
    }

    #[test]
    fn text_document_round_trip() {
        let text = "línea 1\nlínea 2";
        assert_eq!(document_to_text(&text_to_document(text)), text);
    }

    #[test]
    fn audit_comment_lists_titles() {
        assert_eq!(audit_comment(&[]), None);
        let body = audit_comment(&["Mejorar estructura".into(), "Casos límite".into()]).unwrap();
        assert_eq!(
            body,
            "🤖 Sugerencias de IA aplicadas:\n• Mejorar estructura\n• Casos límite\n\nGenerado por Jira AI Assistant"
        );
    }

    #[test]
    fn free_text_excludes_criteria_block() {
        let issue = Issue::new(
            "P-2",
            "x",
            "Intro\n\n## Criterios de Aceptación\n\nEscenario: A\n  Dado que a\n",
        );
        assert_eq!(issue.free_text(), "Intro");
    }
}
