use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{EntryStore, StoreError, StoreResult, UserStore};
use crate::models::diary_entry::{DiaryEntry, NewEntry};
use crate::models::mood::MoodLabel;
use crate::models::user::{NewUser, User};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Turn a unique-constraint failure into `Duplicate`; everything else is a storage fault.
fn map_insert_error(err: sqlx::Error) -> StoreError {
    let unique_violation = err
        .as_database_error()
        .and_then(|e| e.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);

    if unique_violation {
        StoreError::Duplicate
    } else {
        StoreError::Unavailable(err)
    }
}

#[async_trait]
impl EntryStore for PgStore {
    async fn insert_entry(&self, entry: NewEntry) -> StoreResult<DiaryEntry> {
        sqlx::query_as::<_, DiaryEntry>(
            r#"
            INSERT INTO diary_entries (id, user_id, text, mood, occurred_on, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(&entry.text)
        .bind(entry.mood)
        .bind(entry.occurred_on())
        .bind(entry.created_at)
        .fetch_one(&self.db)
        .await
        .map_err(map_insert_error)
    }

    async fn find_entry_by_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
    ) -> StoreResult<Option<DiaryEntry>> {
        let entry = sqlx::query_as::<_, DiaryEntry>(
            "SELECT * FROM diary_entries WHERE user_id = $1 AND occurred_on = $2",
        )
        .bind(user_id)
        .bind(day)
        .fetch_optional(&self.db)
        .await?;

        Ok(entry)
    }

    async fn update_entry(
        &self,
        id: Uuid,
        user_id: Uuid,
        text: String,
        mood: Option<MoodLabel>,
    ) -> StoreResult<Option<DiaryEntry>> {
        let entry = sqlx::query_as::<_, DiaryEntry>(
            r#"
            UPDATE diary_entries SET
                text = $3,
                mood = $4,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&text)
        .bind(mood)
        .fetch_optional(&self.db)
        .await?;

        Ok(entry)
    }

    async fn list_entries(&self, user_id: Uuid) -> StoreResult<Vec<DiaryEntry>> {
        let entries = sqlx::query_as::<_, DiaryEntry>(
            r#"
            SELECT * FROM diary_entries
            WHERE user_id = $1
            ORDER BY occurred_on DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    async fn list_entries_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<DiaryEntry>> {
        let entries = sqlx::query_as::<_, DiaryEntry>(
            r#"
            SELECT * FROM diary_entries
            WHERE user_id = $1 AND created_at >= $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(map_insert_error)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }
}
