use crate::scenario::GherkinScenario;
use crate::step::{classify, scenario_title, StepCounts, StepKind};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GherkinBlock
// ---------------------------------------------------------------------------

/// Suggested Gherkin as exchanged with the suggestion provider: one string
/// or a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GherkinBlock {
    Text(String),
    Lines(Vec<String>),
}

impl GherkinBlock {
    pub fn to_text(&self) -> String {
        match self {
            GherkinBlock::Text(s) => s.clone(),
            GherkinBlock::Lines(lines) => lines.join("\n"),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            GherkinBlock::Text(s) => s.trim().is_empty(),
            GherkinBlock::Lines(lines) => lines.iter().all(|l| l.trim().is_empty()),
        }
    }
}

impl From<String> for GherkinBlock {
    fn from(s: String) -> Self {
        GherkinBlock::Text(s)
    }
}

impl From<&str> for GherkinBlock {
    fn from(s: &str) -> Self {
        GherkinBlock::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse every scenario block in `text`, in order of appearance.
///
/// Text before the first scenario header is not represented in the result.
/// A header with no step lines still yields a (title-only) scenario.
pub fn parse_scenarios(text: &str) -> Vec<GherkinScenario> {
    let mut scenarios = Vec::new();
    let mut current: Option<(GherkinScenario, StepCounts)> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(title) = scenario_title(line) {
            if let Some((scenario, _)) = current.take() {
                scenarios.push(scenario);
            }
            current = Some((GherkinScenario::new(title), StepCounts::default()));
            continue;
        }

        let Some((scenario, counts)) = current.as_mut() else {
            continue;
        };
        let step = classify(line, counts);
        let bucket = match step.kind {
            StepKind::Given => &mut scenario.given,
            StepKind::When => &mut scenario.when,
            StepKind::Then => &mut scenario.then,
            StepKind::And => &mut scenario.and,
            StepKind::But => &mut scenario.but,
            StepKind::None => continue,
        };
        bucket.push(step.text.to_string());
        counts.accept(step.kind);
    }

    if let Some((scenario, _)) = current {
        scenarios.push(scenario);
    }

    tracing::debug!(count = scenarios.len(), "parsed scenarios");
    scenarios
}

/// Parse a suggested Gherkin block into new scenarios.
pub fn parse_block(block: &GherkinBlock) -> Vec<GherkinScenario> {
    parse_scenarios(&block.to_text())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_login_scenario() {
        let text = "Escenario: Login\n  Dado que soy un usuario\n  Cuando hago clic\n  Entonces veo el dashboard";
        let scenarios = parse_scenarios(text);
        assert_eq!(scenarios.len(), 1);
        let s = &scenarios[0];
        assert_eq!(s.title, "Login");
        assert_eq!(s.given, vec!["soy un usuario"]);
        assert_eq!(s.when, vec!["hago clic"]);
        assert_eq!(s.then, vec!["veo el dashboard"]);
        assert!(s.and.is_empty());
        assert!(s.but.is_empty());
    }

    #[test]
    fn empty_text_yields_no_scenarios() {
        assert!(parse_scenarios("").is_empty());
        assert!(parse_scenarios("   \n\n").is_empty());
    }

    #[test]
    fn text_without_header_yields_no_scenarios() {
        let text = "Como usuario quiero entrar.\nDado que algo\nCuando pasa";
        assert!(parse_scenarios(text).is_empty());
    }

    #[test]
    fn prose_before_first_header_is_dropped() {
        let text = "Intro libre\nDado que no cuenta\n\nEscenario: A\nDado que x";
        let scenarios = parse_scenarios(text);
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].given, vec!["x"]);
    }

    #[test]
    fn title_only_scenario_is_emitted() {
        let scenarios = parse_scenarios("Escenario: Pendiente\nEscenario: Otro\n  Dado que a");
        assert_eq!(scenarios.len(), 2);
        assert!(scenarios[0].is_empty());
        assert_eq!(scenarios[0].title, "Pendiente");
        assert_eq!(scenarios[1].given, vec!["a"]);
    }

    #[test]
    fn continuation_routing_follows_latest_section() {
        let text = "\
Escenario: Login exitoso
  Dado que soy un usuario registrado
  Y que mi cuenta está activa
  Y estoy en la página de login
  Cuando ingreso mi email
  Y hago clic en Iniciar Sesión
  Entonces debo ser autenticado
  Y debo ver el dashboard";
        let s = &parse_scenarios(text)[0];
        assert_eq!(
            s.given,
            vec![
                "soy un usuario registrado",
                "mi cuenta está activa",
                "estoy en la página de login"
            ]
        );
        assert_eq!(s.when, vec!["ingreso mi email", "hago clic en Iniciar Sesión"]);
        assert_eq!(s.then, vec!["debo ser autenticado", "debo ver el dashboard"]);
    }

    #[test]
    fn leading_y_goes_to_and_bucket() {
        let s = &parse_scenarios("Escenario: Raro\n  Y algo previo\n  Dado que x")[0];
        assert_eq!(s.and, vec!["algo previo"]);
        assert_eq!(s.given, vec!["x"]);
    }

    #[test]
    fn pero_goes_to_but_anywhere() {
        let s = &parse_scenarios("Escenario: B\n  Pero primero\n  Dado que a\n  Pero luego")[0];
        assert_eq!(s.but, vec!["primero", "luego"]);
        assert_eq!(s.given, vec!["a"]);
    }

    #[test]
    fn counts_reset_per_scenario() {
        let text = "Escenario: A\n  Entonces fin\nEscenario: B\n  Y suelto";
        let scenarios = parse_scenarios(text);
        assert_eq!(scenarios[1].and, vec!["suelto"]);
        assert!(scenarios[1].then.is_empty());
    }

    #[test]
    fn non_step_lines_inside_scenario_are_ignored() {
        let s = &parse_scenarios("Escenario: A\n  Dado que a\n  # comentario\n  Entonces b")[0];
        assert_eq!(s.given, vec!["a"]);
        assert_eq!(s.then, vec!["b"]);
    }

    #[test]
    fn identical_scenarios_get_distinct_ids() {
        let scenarios = parse_scenarios("Escenario: A\n  Dado que a\nEscenario: A\n  Dado que a");
        assert_eq!(scenarios.len(), 2);
        assert_ne!(scenarios[0].id, scenarios[1].id);
    }

    #[test]
    fn bold_headers_from_older_descriptions() {
        let text = "**Escenario:** Login\nDado que a\nCuando b\nEntonces c\n";
        let s = &parse_scenarios(text)[0];
        assert_eq!(s.title, "Login");
        assert_eq!(s.then, vec!["c"]);
    }

    #[test]
    fn english_scenarios() {
        let text = "Scenario: Checkout\n  Given a cart\n  And an address\n  When I pay\n  Then I get a receipt\n  But no email";
        let s = &parse_scenarios(text)[0];
        assert_eq!(s.given, vec!["a cart", "an address"]);
        assert_eq!(s.when, vec!["I pay"]);
        assert_eq!(s.then, vec!["I get a receipt"]);
        assert_eq!(s.but, vec!["no email"]);
    }

    #[test]
    fn block_lines_are_joined() {
        let block = GherkinBlock::Lines(vec![
            "Escenario: X".into(),
            "  Dado que a".into(),
            "  Entonces b".into(),
        ]);
        let scenarios = parse_block(&block);
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].then, vec!["b"]);
    }

    #[test]
    fn block_deserializes_from_string_or_array() {
        let one: GherkinBlock = serde_json::from_str("\"Escenario: A\"").unwrap();
        assert_eq!(one, GherkinBlock::Text("Escenario: A".into()));
        let many: GherkinBlock = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert_eq!(many.to_text(), "a\nb");
        assert!(GherkinBlock::Lines(vec![" ".into()]).is_blank());
    }
}
