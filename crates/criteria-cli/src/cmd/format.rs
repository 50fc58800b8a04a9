use crate::input::read_input;
use crate::output::print_json;
use anyhow::Context;
use criteria_core::formatter::format_scenarios;
use criteria_core::scenario::GherkinScenario;
use criteria_core::types::Dialect;
use std::path::Path;

pub fn run(
    root: &Path,
    file: Option<&Path>,
    dialect: Option<Dialect>,
    json: bool,
) -> anyhow::Result<()> {
    let cfg = super::load_config(root)?;
    let dialect = super::resolve_dialect(&cfg, dialect);

    let raw = read_input(file)?;
    let scenarios: Vec<GherkinScenario> =
        serde_json::from_str(&raw).context("expected a JSON array of scenarios")?;
    let text = format_scenarios(&scenarios, dialect);

    if json {
        print_json(&serde_json::json!({ "dialect": dialect, "text": text }))
    } else {
        print!("{text}");
        Ok(())
    }
}
