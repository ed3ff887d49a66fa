use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid column '{0}': expected backlog, todo, doing or done")]
    InvalidColumn(String),

    #[error("invalid period '{0}': expected today, week, month or all")]
    InvalidPeriod(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("milestone not found: {0}")]
    MilestoneNotFound(String),

    #[error("project path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl KanbanError {
    /// True for errors caused by the caller's input rather than the filesystem.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            KanbanError::MissingField(_)
                | KanbanError::InvalidField { .. }
                | KanbanError::InvalidColumn(_)
                | KanbanError::InvalidPeriod(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, KanbanError>;
