use thiserror::Error;

#[derive(Debug, Error)]
pub enum CriteriaError {
    #[error("issue not found: {0}")]
    IssueNotFound(String),

    #[error("not authorized: check the tracker credentials")]
    Unauthorized,

    #[error("no permission to access issue: {0}")]
    Forbidden(String),

    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("invalid suggestion category: {0}")]
    InvalidCategory(String),

    #[error("invalid priority '{0}': must be Low, Medium or High")]
    InvalidPriority(String),

    #[error("invalid knowledge category: {0}")]
    InvalidKnowledgeCategory(String),

    #[error("invalid dialect '{0}': must be spanish or english")]
    InvalidDialect(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("tracker error: {0}")]
    Tracker(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, CriteriaError>;
