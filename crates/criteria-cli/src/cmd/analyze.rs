use crate::input::read_input;
use crate::output::print_json;
use criteria_core::analyzer::analyze;
use criteria_core::parser::parse_scenarios;
use std::path::Path;

/// Report only: problems never change the exit status.
pub fn run(file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let text = read_input(file)?;
    let scenarios = parse_scenarios(&text);
    let analysis = analyze(&scenarios);

    if json {
        return print_json(&analysis);
    }

    println!(
        "{} scenario(s), {}",
        analysis.scenarios.len(),
        if analysis.is_valid_gherkin {
            "structure OK"
        } else {
            "structure has problems"
        }
    );
    for issue in &analysis.issues {
        println!("[{}] {}", issue.kind, issue.message);
    }
    for hint in &analysis.suggestions {
        println!("[hint:{}] {}", hint.kind, hint.message);
    }
    Ok(())
}
