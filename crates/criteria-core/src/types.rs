use crate::error::CriteriaError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Dialect
// ---------------------------------------------------------------------------

/// Keyword vocabulary used when rendering scenarios.
///
/// Parsing accepts both vocabularies regardless of the dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    #[default]
    Spanish,
    English,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Spanish => "spanish",
            Dialect::English => "english",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dialect {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spanish" | "es" => Ok(Dialect::Spanish),
            "english" | "en" => Ok(Dialect::English),
            _ => Err(CriteriaError::InvalidDialect(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SuggestionCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuggestionCategory {
    #[serde(rename = "Gherkin Structure")]
    GherkinStructure,
    #[serde(rename = "Acceptance Criteria")]
    AcceptanceCriteria,
    #[serde(rename = "User Story Format")]
    UserStoryFormat,
    #[serde(rename = "Edge Cases")]
    EdgeCases,
    Performance,
    Security,
    Usability,
}

impl SuggestionCategory {
    pub fn all() -> &'static [SuggestionCategory] {
        &[
            SuggestionCategory::GherkinStructure,
            SuggestionCategory::AcceptanceCriteria,
            SuggestionCategory::UserStoryFormat,
            SuggestionCategory::EdgeCases,
            SuggestionCategory::Performance,
            SuggestionCategory::Security,
            SuggestionCategory::Usability,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionCategory::GherkinStructure => "Gherkin Structure",
            SuggestionCategory::AcceptanceCriteria => "Acceptance Criteria",
            SuggestionCategory::UserStoryFormat => "User Story Format",
            SuggestionCategory::EdgeCases => "Edge Cases",
            SuggestionCategory::Performance => "Performance",
            SuggestionCategory::Security => "Security",
            SuggestionCategory::Usability => "Usability",
        }
    }
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SuggestionCategory {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SuggestionCategory::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CriteriaError::InvalidCategory(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(CriteriaError::InvalidPriority(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// KnowledgeCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KnowledgeCategory {
    BusinessRules,
    TechnicalSpecs,
    UserPersonas,
    Templates,
    Examples,
    Glossary,
}

impl KnowledgeCategory {
    pub fn all() -> &'static [KnowledgeCategory] {
        &[
            KnowledgeCategory::BusinessRules,
            KnowledgeCategory::TechnicalSpecs,
            KnowledgeCategory::UserPersonas,
            KnowledgeCategory::Templates,
            KnowledgeCategory::Examples,
            KnowledgeCategory::Glossary,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KnowledgeCategory::BusinessRules => "business-rules",
            KnowledgeCategory::TechnicalSpecs => "technical-specs",
            KnowledgeCategory::UserPersonas => "user-personas",
            KnowledgeCategory::Templates => "templates",
            KnowledgeCategory::Examples => "examples",
            KnowledgeCategory::Glossary => "glossary",
        }
    }
}

impl fmt::Display for KnowledgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for KnowledgeCategory {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnowledgeCategory::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CriteriaError::InvalidKnowledgeCategory(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// FileStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Uploading,
    Processing,
    #[default]
    Completed,
    Error,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
