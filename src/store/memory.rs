use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EntryStore, StoreError, StoreResult, UserStore};
use crate::models::diary_entry::{DiaryEntry, NewEntry};
use crate::models::mood::MoodLabel;
use crate::models::user::{NewUser, User};

#[derive(Default)]
struct Inner {
    entries: HashMap<Uuid, DiaryEntry>,
    entry_by_day: HashMap<(Uuid, NaiveDate), Uuid>,
    users: HashMap<Uuid, User>,
    user_by_email: HashMap<String, Uuid>,
}

/// Process-local store. Every write takes the single write lock, so the
/// `(user_id, occurred_on)` check and the insert cannot interleave.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed entry, keeping its timestamps. Loads past
    /// history (the startup demo seed, tests) without going through "today".
    pub async fn import_entry(&self, entry: DiaryEntry) -> StoreResult<DiaryEntry> {
        let mut inner = self.inner.write().await;
        let key = (entry.user_id, entry.occurred_on);
        if inner.entry_by_day.contains_key(&key) {
            return Err(StoreError::Duplicate);
        }
        inner.entry_by_day.insert(key, entry.id);
        inner.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn insert_entry(&self, entry: NewEntry) -> StoreResult<DiaryEntry> {
        let occurred_on = entry.occurred_on();
        self.import_entry(DiaryEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            text: entry.text,
            mood: Some(entry.mood),
            occurred_on,
            created_at: entry.created_at,
            updated_at: entry.created_at,
        })
        .await
    }

    async fn find_entry_by_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
    ) -> StoreResult<Option<DiaryEntry>> {
        let inner = self.inner.read().await;
        Ok(inner
            .entry_by_day
            .get(&(user_id, day))
            .and_then(|id| inner.entries.get(id))
            .cloned())
    }

    async fn update_entry(
        &self,
        id: Uuid,
        user_id: Uuid,
        text: String,
        mood: Option<MoodLabel>,
    ) -> StoreResult<Option<DiaryEntry>> {
        let mut inner = self.inner.write().await;
        let Some(entry) = inner.entries.get_mut(&id).filter(|e| e.user_id == user_id) else {
            return Ok(None);
        };
        entry.text = text;
        entry.mood = mood;
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }

    async fn list_entries(&self, user_id: Uuid) -> StoreResult<Vec<DiaryEntry>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<DiaryEntry> = inner
            .entries
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            b.occurred_on
                .cmp(&a.occurred_on)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    async fn list_entries_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<DiaryEntry>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<DiaryEntry> = inner
            .entries
            .values()
            .filter(|e| e.user_id == user_id && e.created_at >= since)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(entries)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        if inner.user_by_email.contains_key(&user.email) {
            return Err(StoreError::Duplicate);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        inner.user_by_email.insert(user.email.clone(), user.id);
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .user_by_email
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }
}
