use crate::output::{print_json, print_table, truncate};
use anyhow::Context;
use clap::Subcommand;
use criteria_core::knowledge::KnowledgeBase;
use criteria_core::types::KnowledgeCategory;
use std::path::Path;

#[derive(Subcommand)]
pub enum KnowledgeSubcommand {
    /// List entries, optionally filtered by category
    List {
        /// business-rules, technical-specs, user-personas, templates, examples or glossary
        #[arg(long)]
        category: Option<KnowledgeCategory>,
    },

    /// Add an entry
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: KnowledgeCategory,
        /// Comma-separated tags matched against story summaries
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        #[arg(long)]
        content: String,
    },

    /// Remove an entry by id
    Remove { id: String },
}

pub fn run(root: &Path, subcmd: KnowledgeSubcommand, json: bool) -> anyhow::Result<()> {
    let mut kb = KnowledgeBase::load(root).context("failed to load knowledge base")?;

    match subcmd {
        KnowledgeSubcommand::List { category } => {
            let items: Vec<_> = kb
                .items
                .iter()
                .filter(|i| category.map_or(true, |c| i.category == c))
                .collect();
            if json {
                return print_json(&items);
            }
            if items.is_empty() {
                println!("No knowledge entries.");
                return Ok(());
            }
            let rows = items
                .iter()
                .map(|i| {
                    vec![
                        i.id.clone(),
                        i.category.to_string(),
                        truncate(&i.title, 40),
                        i.tags.join(","),
                    ]
                })
                .collect();
            print_table(&["ID", "CATEGORY", "TITLE", "TAGS"], rows);
            Ok(())
        }

        KnowledgeSubcommand::Add {
            title,
            category,
            tags,
            content,
        } => {
            let tags = tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            let id = kb.add(title, category, content, tags);
            kb.save(root).context("failed to save knowledge base")?;
            if json {
                print_json(&serde_json::json!({ "id": id }))
            } else {
                println!("Added {id}.");
                Ok(())
            }
        }

        KnowledgeSubcommand::Remove { id } => {
            if !kb.remove(&id) {
                anyhow::bail!("knowledge entry not found: {id}");
            }
            kb.save(root).context("failed to save knowledge base")?;
            if json {
                print_json(&serde_json::json!({ "removed": id }))
            } else {
                println!("Removed {id}.");
                Ok(())
            }
        }
    }
}
