//! Step classification for Gherkin-flavored text.
//!
//! A line is matched against the keyword rules in priority order. Bare `Y` /
//! `And` continuations are resolved against the steps already accepted in the
//! active scenario, so callers carry a [`StepCounts`] per scenario and reset
//! it on every scenario header.

use crate::types::Dialect;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Keywords a dialect renders. The first given keyword carries its connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    pub scenario: &'static str,
    pub given: &'static str,
    pub when: &'static str,
    pub then: &'static str,
    pub and: &'static str,
    pub but: &'static str,
}

pub const SPANISH: Vocabulary = Vocabulary {
    scenario: "Escenario",
    given: "Dado que",
    when: "Cuando",
    then: "Entonces",
    and: "Y",
    but: "Pero",
};

pub const ENGLISH: Vocabulary = Vocabulary {
    scenario: "Scenario",
    given: "Given",
    when: "When",
    then: "Then",
    and: "And",
    but: "But",
};

impl Vocabulary {
    pub fn for_dialect(dialect: Dialect) -> &'static Vocabulary {
        match dialect {
            Dialect::Spanish => &SPANISH,
            Dialect::English => &ENGLISH,
        }
    }
}

// Longer keywords first so the connective is stripped along with the keyword.
const GIVEN_KEYWORDS: &[&str] = &["Dado que", "Dado", "Y que", "Given"];
const WHEN_KEYWORDS: &[&str] = &["Cuando", "When"];
const THEN_KEYWORDS: &[&str] = &["Entonces", "Then"];
const BUT_KEYWORDS: &[&str] = &["Pero", "But"];
const AND_KEYWORDS: &[&str] = &["Y", "And"];
const SCENARIO_KEYWORDS: &[&str] = &["Escenario:", "Scenario:"];

// ---------------------------------------------------------------------------
// StepKind / StepCounts / ClassifiedStep
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Given,
    When,
    Then,
    And,
    But,
    None,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Given => "given",
            StepKind::When => "when",
            StepKind::Then => "then",
            StepKind::And => "and",
            StepKind::But => "but",
            StepKind::None => "none",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Steps already accepted into the active scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCounts {
    pub given: usize,
    pub when: usize,
    pub then: usize,
}

impl StepCounts {
    /// Record a step routed to `kind`. `And`, `But` and `None` do not affect
    /// continuation routing.
    pub fn accept(&mut self, kind: StepKind) {
        match kind {
            StepKind::Given => self.given += 1,
            StepKind::When => self.when += 1,
            StepKind::Then => self.then += 1,
            StepKind::And | StepKind::But | StepKind::None => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedStep<'a> {
    pub kind: StepKind,
    /// Step text with the keyword and connective removed.
    pub text: &'a str,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a single trimmed line.
///
/// Priority: given keywords (including `Y que`), `Cuando`, `Entonces`,
/// `Pero`, then bare `Y`. A bare continuation follows the latest section with
/// steps (then, when, given in that order) and is `And` when the scenario has
/// none yet.
pub fn classify<'a>(line: &'a str, counts: &StepCounts) -> ClassifiedStep<'a> {
    let line = line.trim();
    let rules: [(&[&str], StepKind); 4] = [
        (GIVEN_KEYWORDS, StepKind::Given),
        (WHEN_KEYWORDS, StepKind::When),
        (THEN_KEYWORDS, StepKind::Then),
        (BUT_KEYWORDS, StepKind::But),
    ];
    for (keywords, kind) in rules {
        if let Some(text) = strip_any(line, keywords) {
            return ClassifiedStep { kind, text };
        }
    }

    if let Some(text) = strip_any(line, AND_KEYWORDS) {
        let kind = if counts.then > 0 {
            StepKind::Then
        } else if counts.when > 0 {
            StepKind::When
        } else if counts.given > 0 {
            StepKind::Given
        } else {
            StepKind::And
        };
        return ClassifiedStep { kind, text };
    }

    ClassifiedStep {
        kind: StepKind::None,
        text: line,
    }
}

/// Title of a scenario header line, or `None` when the line is not a header.
///
/// Accepts the Markdown-bold form (`**Escenario:** Login`) that older tracker
/// descriptions carry.
pub fn scenario_title(line: &str) -> Option<&str> {
    let line = line.trim();
    let unbolded = line.strip_prefix("**").unwrap_or(line);
    let rest = SCENARIO_KEYWORDS
        .iter()
        .find_map(|kw| unbolded.strip_prefix(kw))?;
    let rest = rest.strip_prefix("**").unwrap_or(rest);
    Some(rest.trim())
}

fn strip_any<'a>(line: &'a str, keywords: &[&str]) -> Option<&'a str> {
    keywords.iter().find_map(|kw| strip_keyword(line, kw))
}

/// Strip a (possibly multi-word) keyword matched as whole words.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let mut rest = line;
    for (i, word) in keyword.split(' ').enumerate() {
        if i > 0 {
            let trimmed = rest.trim_start();
            if trimmed.len() == rest.len() {
                return None;
            }
            rest = trimmed;
        }
        rest = rest.strip_prefix(word)?;
    }
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(given: usize, when: usize, then: usize) -> StepCounts {
        StepCounts { given, when, then }
    }

    #[test]
    fn dado_que_strips_connective() {
        let step = classify("Dado que soy un usuario", &StepCounts::default());
        assert_eq!(step.kind, StepKind::Given);
        assert_eq!(step.text, "soy un usuario");
    }

    #[test]
    fn dado_without_que() {
        let step = classify("Dado un carrito vacío", &StepCounts::default());
        assert_eq!(step.kind, StepKind::Given);
        assert_eq!(step.text, "un carrito vacío");
    }

    #[test]
    fn y_que_after_given_is_given() {
        let step = classify("Y que mi cuenta está activa", &counts(1, 0, 0));
        assert_eq!(step.kind, StepKind::Given);
        assert_eq!(step.text, "mi cuenta está activa");
    }

    #[test]
    fn bare_y_after_then_is_then() {
        let step = classify("Y debo ver el dashboard", &counts(1, 1, 1));
        assert_eq!(step.kind, StepKind::Then);
        assert_eq!(step.text, "debo ver el dashboard");
    }

    #[test]
    fn bare_y_after_when_is_when() {
        let step = classify("Y hago clic", &counts(1, 1, 0));
        assert_eq!(step.kind, StepKind::When);
    }

    #[test]
    fn bare_y_after_given_only_is_given() {
        let step = classify("Y tengo saldo", &counts(2, 0, 0));
        assert_eq!(step.kind, StepKind::Given);
    }

    #[test]
    fn bare_y_before_any_section_is_and() {
        let step = classify("Y algo ambiguo", &StepCounts::default());
        assert_eq!(step.kind, StepKind::And);
        assert_eq!(step.text, "algo ambiguo");
    }

    #[test]
    fn pero_is_always_but() {
        let step = classify("Pero no veo errores", &counts(1, 1, 1));
        assert_eq!(step.kind, StepKind::But);
        assert_eq!(step.text, "no veo errores");
    }

    #[test]
    fn keywords_need_word_boundary() {
        assert_eq!(classify("Yo no soy un paso", &counts(1, 0, 0)).kind, StepKind::None);
        assert_eq!(classify("Cuandoquiera", &StepCounts::default()).kind, StepKind::None);
        assert_eq!(classify("Dado quesos", &StepCounts::default()).text, "quesos");
    }

    #[test]
    fn english_vocabulary() {
        assert_eq!(classify("Given a user", &StepCounts::default()).kind, StepKind::Given);
        assert_eq!(classify("When I log in", &counts(1, 0, 0)).kind, StepKind::When);
        assert_eq!(classify("Then I see it", &counts(1, 1, 0)).kind, StepKind::Then);
        assert_eq!(classify("And more", &counts(1, 1, 1)).kind, StepKind::Then);
        assert_eq!(classify("But not that", &counts(1, 1, 1)).kind, StepKind::But);
    }

    #[test]
    fn plain_text_is_none() {
        let step = classify("Notas del analista", &StepCounts::default());
        assert_eq!(step.kind, StepKind::None);
    }

    #[test]
    fn scenario_header_variants() {
        assert_eq!(scenario_title("Escenario: Login"), Some("Login"));
        assert_eq!(scenario_title("  Scenario:   Logout  "), Some("Logout"));
        assert_eq!(scenario_title("**Escenario:** Registro"), Some("Registro"));
        assert_eq!(scenario_title("Escenario:"), Some(""));
        assert_eq!(scenario_title("Un Escenario: no"), None);
    }

    #[test]
    fn counts_accept_only_sections() {
        let mut c = StepCounts::default();
        c.accept(StepKind::Given);
        c.accept(StepKind::And);
        c.accept(StepKind::But);
        c.accept(StepKind::Then);
        assert_eq!(c, counts(1, 0, 1));
    }
}
