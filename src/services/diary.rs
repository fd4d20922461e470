use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::mood_classifier::MoodClassifier;
use super::{DiaryError, DiaryResult};
use crate::models::diary_entry::{DiaryEntry, NewEntry};
use crate::models::mood::MoodLabel;
use crate::store::{EntryStore, StoreError};

/// The server's calendar day. All day bucketing uses UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Create/read/update of a user's entry for the current day. Holds no
/// per-request state; everything lives in the store.
#[derive(Clone)]
pub struct DiaryService {
    store: Arc<dyn EntryStore>,
    classifier: MoodClassifier,
}

impl DiaryService {
    pub fn new(store: Arc<dyn EntryStore>, classifier: MoodClassifier) -> Self {
        Self { store, classifier }
    }

    /// Create today's entry. Without an explicit mood one is derived from the text.
    /// A concurrent second create for the same day loses with `DuplicateEntry`.
    pub async fn create_today(
        &self,
        user_id: Uuid,
        text: Option<String>,
        mood: Option<MoodLabel>,
    ) -> DiaryResult<DiaryEntry> {
        let text = text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| DiaryError::Validation("Entry text is required".into()))?;

        let mood = mood.unwrap_or_else(|| self.classifier.classify(&text));
        let new_entry = NewEntry {
            user_id,
            text,
            mood,
            created_at: Utc::now(),
        };
        let occurred_on = new_entry.occurred_on();

        let entry = match self.store.insert_entry(new_entry).await {
            Ok(entry) => entry,
            Err(StoreError::Duplicate) => {
                tracing::info!(user_id = %user_id, occurred_on = %occurred_on, "Duplicate entry for today rejected");
                return Err(DiaryError::DuplicateEntry);
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            user_id = %user_id,
            entry_id = %entry.id,
            occurred_on = %occurred_on,
            mood = %mood,
            "Diary entry created"
        );

        Ok(entry)
    }

    /// Today's entry, or `None` if the user has not written one yet.
    pub async fn get_today(&self, user_id: Uuid) -> DiaryResult<Option<DiaryEntry>> {
        Ok(self.store.find_entry_by_day(user_id, today_utc()).await?)
    }

    /// Update today's entry.
    ///
    /// - new text replaces the old; without an explicit mood the mood is
    ///   re-derived from the new text
    /// - an explicit mood always wins
    /// - with neither, the entry is returned unchanged
    pub async fn update_today(
        &self,
        user_id: Uuid,
        text: Option<String>,
        mood: Option<MoodLabel>,
    ) -> DiaryResult<DiaryEntry> {
        let entry = self
            .store
            .find_entry_by_day(user_id, today_utc())
            .await?
            .ok_or(DiaryError::NotFound)?;

        let text = text.filter(|t| !t.trim().is_empty());
        if text.is_none() && mood.is_none() {
            return Ok(entry);
        }

        let new_mood = match (mood, &text) {
            (Some(explicit), _) => Some(explicit),
            (None, Some(new_text)) => Some(self.classifier.classify(new_text)),
            (None, None) => entry.mood,
        };
        let new_text = text.unwrap_or(entry.text);

        let updated = self
            .store
            .update_entry(entry.id, user_id, new_text, new_mood)
            .await?
            .ok_or(DiaryError::NotFound)?;

        tracing::info!(
            user_id = %user_id,
            entry_id = %updated.id,
            mood = ?updated.mood,
            "Diary entry updated"
        );

        Ok(updated)
    }

    /// Every entry the user has written, most recent day first.
    pub async fn list(&self, user_id: Uuid) -> DiaryResult<Vec<DiaryEntry>> {
        Ok(self.store.list_entries(user_id).await?)
    }
}
