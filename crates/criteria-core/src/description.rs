use crate::formatter::format_scenarios;
use crate::scenario::GherkinScenario;
use crate::step::scenario_title;
use crate::types::Dialect;
use regex::Regex;
use std::sync::OnceLock;

pub const ACCEPTANCE_CRITERIA_HEADING: &str = "## Criterios de Aceptación";

/// Separator between the free text and the rendered scenarios in a tracker
/// description.
pub const ACCEPTANCE_CRITERIA_MARKER: &str = "\n\n## Criterios de Aceptación\n\n";

fn user_story_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)como\s+.*?\s+quiero\s+.*?\s+para\s+.*?\.").expect("valid user story regex")
    })
}

/// Description text sent upstream: free text, the marker, then every scenario.
///
/// With no scenarios the free text is returned unchanged (no empty heading).
pub fn compose_description(
    free_text: &str,
    scenarios: &[GherkinScenario],
    dialect: Dialect,
) -> String {
    if scenarios.is_empty() {
        return free_text.to_string();
    }
    format!(
        "{free_text}{ACCEPTANCE_CRITERIA_MARKER}{}",
        format_scenarios(scenarios, dialect)
    )
}

/// Split a description into free text and its criteria block.
///
/// The block starts at the acceptance-criteria heading, or at the first
/// scenario header when the heading is missing, so re-composing never writes
/// the same scenarios twice.
pub fn split_description(text: &str) -> (&str, Option<&str>) {
    if let Some(pos) = text.find(ACCEPTANCE_CRITERIA_HEADING) {
        let criteria = &text[pos + ACCEPTANCE_CRITERIA_HEADING.len()..];
        return (text[..pos].trim_end(), Some(criteria.trim_start()));
    }
    match first_header_offset(text) {
        Some(pos) => (text[..pos].trim_end(), Some(&text[pos..])),
        None => (text, None),
    }
}

fn first_header_offset(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if scenario_title(line).is_some() {
            return Some(offset + (line.len() - line.trim_start().len()));
        }
        offset += line.len();
    }
    None
}

/// First "Como ... quiero ... para ..." sentence in `text`.
pub fn extract_user_story(text: &str) -> Option<String> {
    user_story_re().find(text).map(|m| m.as_str().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_scenarios;

    fn login() -> GherkinScenario {
        let mut s = GherkinScenario::new("Login");
        s.given = vec!["soy un usuario".into()];
        s.when = vec!["hago clic".into()];
        s.then = vec!["veo el dashboard".into()];
        s
    }

    #[test]
    fn compose_appends_marker_and_scenarios() {
        let text = compose_description("Historia base", &[login()], Dialect::Spanish);
        assert_eq!(
            text,
            "Historia base\n\n## Criterios de Aceptación\n\nEscenario: Login\n  Dado que soy un usuario\n  Cuando hago clic\n  Entonces veo el dashboard\n"
        );
    }

    #[test]
    fn compose_without_scenarios_keeps_text() {
        assert_eq!(compose_description("Solo texto", &[], Dialect::Spanish), "Solo texto");
    }

    #[test]
    fn composed_description_parses_back() {
        let text = compose_description("Intro\nDado que prosa", &[login()], Dialect::Spanish);
        let scenarios = parse_scenarios(&text);
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].given, vec!["soy un usuario"]);
    }

    #[test]
    fn split_recovers_free_text() {
        let text = compose_description("Intro libre", &[login()], Dialect::Spanish);
        let (free, criteria) = split_description(&text);
        assert_eq!(free, "Intro libre");
        assert!(criteria.unwrap().starts_with("Escenario: Login"));

        let again = compose_description(free, &[login()], Dialect::Spanish);
        assert_eq!(again.matches(ACCEPTANCE_CRITERIA_HEADING).count(), 1);
    }

    #[test]
    fn split_without_heading() {
        assert_eq!(split_description("nada"), ("nada", None));
    }

    #[test]
    fn split_at_first_header_when_heading_is_missing() {
        let text = "Historia\n\n  Escenario: A\n  Dado que x\n\nEscenario: B\n";
        let (free, criteria) = split_description(text);
        assert_eq!(free, "Historia");
        assert_eq!(criteria, Some("Escenario: A\n  Dado que x\n\nEscenario: B\n"));

        assert_eq!(split_description("**Escenario:** A\n").0, "");
    }

    #[test]
    fn extracts_user_story() {
        let text = "Contexto.\nComo usuario registrado quiero iniciar sesión para ver mis datos. Otra frase.";
        assert_eq!(
            extract_user_story(text).as_deref(),
            Some("Como usuario registrado quiero iniciar sesión para ver mis datos.")
        );
        assert_eq!(extract_user_story("sin historia"), None);
    }
}
