pub mod analyzer;
pub mod config;
pub mod description;
pub mod error;
pub mod formatter;
pub mod io;
pub mod jira;
pub mod knowledge;
pub mod parser;
pub mod paths;
pub mod scenario;
pub mod session;
pub mod step;
pub mod suggest;
pub mod tracker;
pub mod types;

pub use error::{CriteriaError, Result};
