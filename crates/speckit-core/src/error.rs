use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecKitError {
    #[error("invalid task ID format '{0}': expected format T001, T042, etc.")]
    InvalidTaskId(String),

    #[error("invalid status '{status}': must be one of: {allowed}")]
    InvalidStatus { status: String, allowed: String },

    #[error("task {task_id} not found in {path}")]
    TaskNotFound { task_id: String, path: String },

    #[error("task {task_id} matched {count} times; refusing to rewrite duplicates")]
    DuplicateTask { task_id: String, count: usize },

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("unknown convention '{0}': expected auto, checkbox, emoji or heading")]
    UnknownConvention(String),

    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpecKitError>;
