use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::mood::MoodLabel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DiaryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub mood: Option<MoodLabel>,
    pub occurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the lifecycle service hands to the store on create. The entry's
/// day is never supplied separately; it is the UTC date of `created_at`.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub user_id: Uuid,
    pub text: String,
    pub mood: MoodLabel,
    pub created_at: DateTime<Utc>,
}

impl NewEntry {
    pub fn occurred_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Shape returned to clients; carries the display emoji alongside the stored fields.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub mood: Option<MoodLabel>,
    pub emoji: Option<&'static str>,
    pub occurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DiaryEntry> for EntryResponse {
    fn from(e: DiaryEntry) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            text: e.text,
            mood: e.mood,
            emoji: e.mood.map(|m| m.emoji()),
            occurred_on: e.occurred_on,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
