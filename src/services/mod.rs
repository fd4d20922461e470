pub mod diary;
pub mod mood_classifier;
pub mod sentiment;
pub mod stats;

use crate::store::StoreError;

/// Outcomes of diary operations that callers are expected to tell apart.
#[derive(Debug, thiserror::Error)]
pub enum DiaryError {
    #[error("Entry for today already exists. Please edit it.")]
    DuplicateEntry,

    #[error("No entry for today")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage unavailable")]
    StorageUnavailable(#[source] StoreError),
}

impl From<StoreError> for DiaryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => DiaryError::DuplicateEntry,
            other => DiaryError::StorageUnavailable(other),
        }
    }
}

pub type DiaryResult<T> = Result<T, DiaryError>;
