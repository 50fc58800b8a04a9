use crate::scenario::GherkinScenario;
use crate::step::Vocabulary;
use crate::types::Dialect;
use std::fmt::Write;

const STEP_INDENT: &str = "  ";

/// Render one scenario as canonical keyword-prefixed text.
///
/// Renders whatever is present: an inconsistent scenario (then without when)
/// is not rejected. Every line, including the last, ends with `\n`.
///
/// A later when or then step whose text starts with `que ` renders as
/// `Y que ...`, which parses back as a given step.
pub fn format_scenario(scenario: &GherkinScenario, dialect: Dialect) -> String {
    let vocab = Vocabulary::for_dialect(dialect);
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", vocab.scenario, scenario.title);

    write_section(&mut out, vocab.given, vocab.and, &scenario.given);
    write_section(&mut out, vocab.when, vocab.and, &scenario.when);
    write_section(&mut out, vocab.then, vocab.and, &scenario.then);
    for step in &scenario.and {
        write_step(&mut out, vocab.and, step);
    }
    for step in &scenario.but {
        write_step(&mut out, vocab.but, step);
    }
    out
}

/// Render a list of scenarios separated by a blank line.
pub fn format_scenarios(scenarios: &[GherkinScenario], dialect: Dialect) -> String {
    let rendered: Vec<String> = scenarios
        .iter()
        .map(|s| format_scenario(s, dialect))
        .collect();
    tracing::debug!(count = scenarios.len(), %dialect, "formatted scenarios");
    rendered.join("\n")
}

fn write_section(out: &mut String, first: &str, rest: &str, steps: &[String]) {
    for (i, step) in steps.iter().enumerate() {
        write_step(out, if i == 0 { first } else { rest }, step);
    }
}

fn write_step(out: &mut String, keyword: &str, step: &str) {
    let _ = writeln!(out, "{STEP_INDENT}{keyword} {step}");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_scenarios;

    fn scenario(title: &str, given: &[&str], when: &[&str], then: &[&str]) -> GherkinScenario {
        let mut s = GherkinScenario::new(title);
        s.given = given.iter().map(|x| x.to_string()).collect();
        s.when = when.iter().map(|x| x.to_string()).collect();
        s.then = then.iter().map(|x| x.to_string()).collect();
        s
    }

    #[test]
    fn formats_login_scenario() {
        let s = scenario("Login", &["soy un usuario"], &["hago clic"], &["veo el dashboard"]);
        assert_eq!(
            format_scenario(&s, Dialect::Spanish),
            "Escenario: Login\n  Dado que soy un usuario\n  Cuando hago clic\n  Entonces veo el dashboard\n"
        );
    }

    #[test]
    fn subsequent_steps_use_y() {
        let s = scenario("X", &["a", "b"], &["c", "d"], &["e", "f"]);
        let text = format_scenario(&s, Dialect::Spanish);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Escenario: X",
                "  Dado que a",
                "  Y b",
                "  Cuando c",
                "  Y d",
                "  Entonces e",
                "  Y f",
            ]
        );
    }

    #[test]
    fn continuation_starting_with_que_reparses_as_given() {
        let s = scenario("X", &["a"], &["c"], &["e", "que se guarde"]);
        let text = format_scenario(&s, Dialect::Spanish);
        assert!(text.ends_with("  Entonces e\n  Y que se guarde\n"));

        let back = &parse_scenarios(&text)[0];
        assert_eq!(back.given, vec!["a", "se guarde"]);
        assert_eq!(back.then, vec!["e"]);
    }

    #[test]
    fn and_then_but_buckets_come_last() {
        let mut s = scenario("X", &["a"], &[], &[]);
        s.and = vec!["suelto".into()];
        s.but = vec!["excepto".into()];
        let text = format_scenario(&s, Dialect::Spanish);
        assert!(text.ends_with("  Dado que a\n  Y suelto\n  Pero excepto\n"));
    }

    #[test]
    fn inconsistent_scenario_still_renders() {
        let s = scenario("Solo then", &[], &[], &["algo"]);
        assert_eq!(
            format_scenario(&s, Dialect::Spanish),
            "Escenario: Solo then\n  Entonces algo\n"
        );
    }

    #[test]
    fn list_is_separated_by_blank_line() {
        let a = scenario("A", &["x"], &[], &[]);
        let b = scenario("B", &["y"], &[], &[]);
        assert_eq!(
            format_scenarios(&[a, b], Dialect::Spanish),
            "Escenario: A\n  Dado que x\n\nEscenario: B\n  Dado que y\n"
        );
        assert_eq!(format_scenarios(&[], Dialect::Spanish), "");
    }

    #[test]
    fn english_dialect() {
        let s = scenario("Pay", &["a cart", "an address"], &["I pay"], &["receipt"]);
        assert_eq!(
            format_scenario(&s, Dialect::English),
            "Scenario: Pay\n  Given a cart\n  And an address\n  When I pay\n  Then receipt\n"
        );
    }

    #[test]
    fn round_trip_preserves_sections() {
        let originals = vec![
            scenario("Login", &["soy un usuario", "mi cuenta está activa"], &["hago clic"], &["veo el dashboard", "veo mi nombre"]),
            scenario("Sin when", &["algo"], &[], &["otro", "más"]),
            scenario("Vacío", &[], &[], &[]),
            scenario("Solo when", &[], &["acción", "segunda acción"], &[]),
        ];
        for dialect in [Dialect::Spanish, Dialect::English] {
            let reparsed = parse_scenarios(&format_scenarios(&originals, dialect));
            assert_eq!(reparsed.len(), originals.len());
            for (a, b) in originals.iter().zip(&reparsed) {
                assert_eq!(a.title, b.title);
                assert_eq!(a.given, b.given);
                assert_eq!(a.when, b.when);
                assert_eq!(a.then, b.then);
            }
        }
    }

    #[test]
    fn leading_and_step_is_stable_across_round_trips() {
        let mut s = scenario("Raro", &[], &[], &[]);
        s.and = vec!["previo".into()];
        let once = parse_scenarios(&format_scenario(&s, Dialect::Spanish));
        let twice = parse_scenarios(&format_scenarios(&once, Dialect::Spanish));
        assert_eq!(once[0].and, vec!["previo"]);
        assert_eq!(twice[0].and, vec!["previo"]);
    }
}
