use crate::error::Result;
use crate::paths;
use crate::types::{FileStatus, KnowledgeCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// KnowledgeItem
// ---------------------------------------------------------------------------

/// Reference entry (rule, persona, template, ...) offered to the suggestion
/// synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: KnowledgeCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub usage: u32,
}

impl KnowledgeItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: KnowledgeCategory,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            category,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            usage: 0,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

// ---------------------------------------------------------------------------
// KnowledgeBase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub items: Vec<KnowledgeItem>,
    #[serde(default)]
    next_seq: u32,
}

impl KnowledgeBase {
    /// Load `.criteria/knowledge.yaml`; a missing file is an empty base.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::knowledge_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let kb: KnowledgeBase = serde_yaml::from_str(&data)?;
        Ok(kb)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::knowledge_path(root), data.as_bytes())
    }

    /// Add an entry and return its generated id (`K1`, `K2`, ...).
    ///
    /// The sequence is stored, so ids stay unique after entries are removed.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        category: KnowledgeCategory,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> String {
        self.next_seq = self.next_seq.max(self.highest_id()) + 1;
        let id = format!("K{}", self.next_seq);
        self.items
            .push(KnowledgeItem::new(id.clone(), title, category, content).with_tags(tags));
        id
    }

    /// Highest numeric `K<n>` suffix among the stored items.
    fn highest_id(&self) -> u32 {
        self.items
            .iter()
            .filter_map(|i| i.id.strip_prefix('K')?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        if let Some(pos) = self.items.iter().position(|i| i.id == id) {
            self.items.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn by_category(&self, category: KnowledgeCategory) -> impl Iterator<Item = &KnowledgeItem> {
        self.items.iter().filter(move |i| i.category == category)
    }
}

// ---------------------------------------------------------------------------
// ContextFile
// ---------------------------------------------------------------------------

/// Text excerpt of a supporting document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFile {
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub status: FileStatus,
}

impl ContextFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            status: FileStatus::Completed,
        }
    }

    /// Read a local file as a completed context file named after its file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, content))
    }

    pub fn is_ready(&self) -> bool {
        self.status == FileStatus::Completed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_base() {
        let dir = TempDir::new().unwrap();
        let kb = KnowledgeBase::load(dir.path()).unwrap();
        assert!(kb.items.is_empty());
    }

    #[test]
    fn add_save_load() {
        let dir = TempDir::new().unwrap();
        let mut kb = KnowledgeBase::default();
        let id = kb.add(
            "Contraseñas seguras",
            KnowledgeCategory::BusinessRules,
            "Mínimo 12 caracteres",
            vec!["login".into(), "contraseña".into()],
        );
        assert_eq!(id, "K1");
        kb.save(dir.path()).unwrap();

        let loaded = KnowledgeBase::load(dir.path()).unwrap();
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].tags, vec!["login", "contraseña"]);
        assert_eq!(loaded.by_category(KnowledgeCategory::BusinessRules).count(), 1);
        assert_eq!(loaded.by_category(KnowledgeCategory::Templates).count(), 0);
    }

    #[test]
    fn ids_not_reused_after_remove() {
        let mut kb = KnowledgeBase::default();
        kb.add("a", KnowledgeCategory::Glossary, "", vec![]);
        kb.add("b", KnowledgeCategory::Glossary, "", vec![]);
        assert!(kb.remove("K1"));
        assert!(!kb.remove("K9"));
        let id = kb.add("c", KnowledgeCategory::Glossary, "", vec![]);
        assert_eq!(id, "K3");
    }

    #[test]
    fn category_is_kebab_case_in_yaml() {
        let yaml = "items:\n- id: K1\n  title: Persona\n  content: x\n  category: user-personas\n  created_at: 2024-01-01T00:00:00Z\n  updated_at: 2024-01-01T00:00:00Z\n";
        let kb: KnowledgeBase = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(kb.items[0].category, KnowledgeCategory::UserPersonas);
        assert!(kb.items[0].tags.is_empty());
    }

    #[test]
    fn add_after_hand_written_yaml_skips_existing_ids() {
        let yaml = "items:\n- id: K1\n  title: Persona\n  content: x\n  category: user-personas\n  created_at: 2024-01-01T00:00:00Z\n  updated_at: 2024-01-01T00:00:00Z\n- id: K4\n  title: Regla\n  content: y\n  category: business-rules\n  created_at: 2024-01-01T00:00:00Z\n  updated_at: 2024-01-01T00:00:00Z\n";
        let mut kb: KnowledgeBase = serde_yaml::from_str(yaml).unwrap();
        let id = kb.add("Plantilla", KnowledgeCategory::Templates, "z", vec![]);
        assert_eq!(id, "K5");

        assert!(kb.remove("K1"));
        assert!(!kb.remove("K1"));
        assert_eq!(kb.add("Otra", KnowledgeCategory::Glossary, "w", vec![]), "K6");
    }

    #[test]
    fn context_file_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requisitos.md");
        std::fs::write(&path, "Requisito 1").unwrap();
        let file = ContextFile::from_path(&path).unwrap();
        assert_eq!(file.name, "requisitos.md");
        assert!(file.is_ready());
    }
}
