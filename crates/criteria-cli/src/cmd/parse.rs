use crate::input::read_input;
use crate::output::{print_json, print_table, truncate};
use criteria_core::parser::parse_scenarios;
use std::path::Path;

pub fn run(file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let text = read_input(file)?;
    let scenarios = parse_scenarios(&text);

    if json {
        return print_json(&scenarios);
    }

    if scenarios.is_empty() {
        println!("No scenarios found.");
        return Ok(());
    }

    let rows = scenarios
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                truncate(&s.title, 48),
                s.given.len().to_string(),
                s.when.len().to_string(),
                s.then.len().to_string(),
                (s.and.len() + s.but.len()).to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "TITLE", "GIVEN", "WHEN", "THEN", "OTHER"], rows);
    Ok(())
}
