//! Demo account and sample history for `STORAGE_BACKEND=memory`.
//!
//! The in-memory store starts empty on every boot, so the seed runs at
//! startup rather than as a separate command.

use chrono::{Duration, NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::error::AppResult;
use crate::models::diary_entry::DiaryEntry;
use crate::models::mood::MoodLabel;
use crate::models::user::{NewUser, User};
use crate::store::memory::MemoryStore;
use crate::store::{StoreError, UserStore};

const SAMPLE_ENTRIES: &[(MoodLabel, &str)] = &[
    (MoodLabel::Happy, "Had a great walk in the park!"),
    (MoodLabel::Sad, "Felt a bit down today."),
    (MoodLabel::Excited, "Started working on a new project!"),
    (MoodLabel::Tired, "Workload drained me."),
    (MoodLabel::Sad, "A pretty average day."),
    (MoodLabel::Neutral, "Today i started my project."),
];

/// Find the demo account by email, creating it on first use.
pub async fn ensure_demo_user(store: &MemoryStore, email: &str, password: &str) -> AppResult<User> {
    let email = email.trim().to_lowercase();
    if let Some(user) = store.find_user_by_email(&email).await? {
        return Ok(user);
    }

    let user = store
        .create_user(NewUser {
            username: "demo".into(),
            email,
            password_hash: hash_password(password)?,
        })
        .await?;
    Ok(user)
}

/// Write one sample entry per day for the days leading up to `today`,
/// leaving `today` itself free. Days that already have an entry are
/// skipped. Returns how many entries were written.
pub async fn seed_sample_entries(
    store: &MemoryStore,
    user_id: Uuid,
    today: NaiveDate,
) -> AppResult<usize> {
    let first_day = today - Duration::days(SAMPLE_ENTRIES.len() as i64);
    let mut written = 0;

    for (offset, (mood, text)) in SAMPLE_ENTRIES.iter().enumerate() {
        let day = first_day + Duration::days(offset as i64);
        let created_at = day.and_time(NaiveTime::MIN).and_utc() + Duration::hours(20);

        let entry = DiaryEntry {
            id: Uuid::new_v4(),
            user_id,
            text: (*text).to_string(),
            mood: Some(*mood),
            occurred_on: day,
            created_at,
            updated_at: created_at,
        };
        match store.import_entry(entry).await {
            Ok(_) => written += 1,
            Err(StoreError::Duplicate) => {}
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(user_id = %user_id, written = written, "Sample diary entries seeded");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EntryStore;

    #[tokio::test]
    async fn test_seed_fills_days_before_today() {
        let store = MemoryStore::new();
        let user = ensure_demo_user(&store, "Demo@Example.com", "demo-password")
            .await
            .unwrap();
        assert_eq!(user.email, "demo@example.com");

        let today = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
        let written = seed_sample_entries(&store, user.id, today).await.unwrap();
        assert_eq!(written, SAMPLE_ENTRIES.len());

        let entries = store.list_entries(user.id).await.unwrap();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].occurred_on, NaiveDate::from_ymd_opt(2025, 9, 6).unwrap());
        assert_eq!(entries[5].occurred_on, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(entries[5].mood, Some(MoodLabel::Happy));
        assert!(entries.iter().all(|e| e.occurred_on == e.created_at.date_naive()));
        assert!(store.find_entry_by_day(user.id, today).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_seed_twice_is_idempotent() {
        let store = MemoryStore::new();
        let first = ensure_demo_user(&store, "demo@example.com", "pw-one").await.unwrap();
        let again = ensure_demo_user(&store, "demo@example.com", "pw-two").await.unwrap();
        assert_eq!(first.id, again.id);

        let today = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
        seed_sample_entries(&store, first.id, today).await.unwrap();
        let written = seed_sample_entries(&store, first.id, today).await.unwrap();
        assert_eq!(written, 0);
        assert_eq!(store.list_entries(first.id).await.unwrap().len(), 6);
    }
}
