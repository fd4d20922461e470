//! Persistence seam for diary entries and user accounts.
//!
//! Two backends implement the same traits:
//! - [`postgres::PgStore`] for deployments; `(user_id, occurred_on)` uniqueness is a
//!   table constraint, so concurrent creates race inside Postgres, not here.
//! - [`memory::MemoryStore`] for tests and `STORAGE_BACKEND=memory`; the existence
//!   check and insert share one write lock, which gives the same guarantee.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::diary_entry::{DiaryEntry, NewEntry};
use crate::models::mood::MoodLabel;
use crate::models::user::{NewUser, User};

pub mod memory;
pub mod postgres;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Record already exists")]
    Duplicate,

    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Insert a new entry. Fails with [`StoreError::Duplicate`] if the user
    /// already has one for `occurred_on`.
    async fn insert_entry(&self, entry: NewEntry) -> StoreResult<DiaryEntry>;

    async fn find_entry_by_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
    ) -> StoreResult<Option<DiaryEntry>>;

    /// Overwrite text and mood of an existing entry; `None` if it is gone.
    async fn update_entry(
        &self,
        id: Uuid,
        user_id: Uuid,
        text: String,
        mood: Option<MoodLabel>,
    ) -> StoreResult<Option<DiaryEntry>>;

    /// All entries for a user, most recent day first, ties broken by creation time descending.
    async fn list_entries(&self, user_id: Uuid) -> StoreResult<Vec<DiaryEntry>>;

    /// Entries created at or after `since`, oldest first.
    async fn list_entries_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<DiaryEntry>>;

    async fn ping(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Duplicate`] if the email is taken.
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
}
