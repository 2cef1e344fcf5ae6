use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// How a caller addressed a record that could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef {
    Id(Uuid),
    Date(NaiveDate),
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRef::Id(id) => write!(f, "id {}", id),
            RecordRef::Date(date) => write!(f, "date {}", date),
        }
    }
}

#[derive(Error, Debug)]
pub enum DailyError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("An entry already exists for {0}; edit it instead")]
    Conflict(NaiveDate),

    #[error("No entry found for {0}")]
    NotFound(RecordRef),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl DailyError {
    /// True for errors the caller can fix by changing its input
    /// (re-prompting, switching from create to edit, re-checking a date).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DailyError::Validation(_) | DailyError::Conflict(_) | DailyError::NotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DailyError>;
