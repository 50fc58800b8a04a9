use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CRITERIA_DIR: &str = ".criteria";
pub const CONFIG_FILE: &str = ".criteria/config.yaml";
pub const KNOWLEDGE_FILE: &str = ".criteria/knowledge.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn criteria_dir(root: &Path) -> PathBuf {
    root.join(CRITERIA_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn knowledge_path(root: &Path) -> PathBuf {
    root.join(KNOWLEDGE_FILE)
}
