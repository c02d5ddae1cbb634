pub mod follows;
pub mod messages;
pub mod users;

use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Integrity(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ModelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn integrity(msg: impl Into<String>) -> Self {
        Self::Integrity(msg.into())
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity(_))
    }
}

// sea-orm surfaces constraint violations through the driver message rather
// than a dedicated variant; this matches the sqlite and postgres wording.
pub(crate) fn classify_db_err(err: DbErr, msg: &str) -> ModelError {
    let raw = err.to_string();
    if raw.contains("UNIQUE")
        || raw.contains("Duplicate")
        || raw.contains("duplicate key")
        || raw.contains("FOREIGN KEY")
        || raw.contains("foreign key")
    {
        return ModelError::integrity(msg.to_string());
    }
    ModelError::Db(err)
}
