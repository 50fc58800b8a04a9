use anyhow::Context;
use criteria_core::config::Config;
use criteria_core::knowledge::KnowledgeBase;
use criteria_core::{io, paths};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing criteria in: {}", root.display());

    let config_yaml = serde_yaml::to_string(&Config::default())?;
    report(
        paths::CONFIG_FILE,
        io::write_if_missing(&paths::config_path(root), config_yaml.as_bytes())
            .context("failed to write config.yaml")?,
    );

    let knowledge_yaml = serde_yaml::to_string(&KnowledgeBase::default())?;
    report(
        paths::KNOWLEDGE_FILE,
        io::write_if_missing(&paths::knowledge_path(root), knowledge_yaml.as_bytes())
            .context("failed to write knowledge.yaml")?,
    );

    println!("\nNext: set tracker credentials in {} or JIRA_* variables.", paths::CONFIG_FILE);
    Ok(())
}

fn report(path: &str, created: bool) {
    if created {
        println!("  created: {path}");
    } else {
        println!("  exists:  {path}");
    }
}
