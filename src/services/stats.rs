//! Read-only aggregates over a user's recent entries.
//!
//! Every figure is recomputed from the store on each call. The pure
//! functions take entries already filtered to the window and ordered by
//! creation time, which is what [`EntryStore::list_entries_since`] returns.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::DiaryResult;
use crate::models::diary_entry::DiaryEntry;
use crate::models::mood::MoodLabel;
use crate::store::EntryStore;

pub const DEFAULT_MOOD_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_STREAK_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_TREND_WINDOW_DAYS: i64 = 7;
pub const MAX_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodStats {
    pub days: i64,
    pub counts: BTreeMap<MoodLabel, u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub days: i64,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub mood: Option<MoodLabel>,
}

/// Lenient `days` parsing: missing, non-numeric or non-positive falls back
/// to the default; very large windows are clamped.
pub fn window_days(raw: Option<&str>, default: i64) -> i64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(days) if days > 0 => days.min(MAX_WINDOW_DAYS),
        _ => default,
    }
}

/// Tally moods. Entries without a mood are left out.
pub fn count_moods(entries: &[DiaryEntry]) -> BTreeMap<MoodLabel, u32> {
    let mut counts = BTreeMap::new();
    for mood in entries.iter().filter_map(|e| e.mood) {
        *counts.entry(mood).or_insert(0) += 1;
    }
    counts
}

/// Walk entries oldest-first by calendar day (UTC).
///
/// A one-day gap extends the current streak, a longer gap restarts it at 1,
/// and a zero-day gap (two entries on the same day) leaves it unchanged.
/// Returns `(current, longest)`.
pub fn compute_streaks(entries: &[DiaryEntry]) -> (u32, u32) {
    let mut current = 0u32;
    let mut longest = 0u32;
    let mut prev_day: Option<NaiveDate> = None;

    for entry in entries {
        let day = entry.created_at.date_naive();
        current = match prev_day {
            None => 1,
            Some(prev) => match (day - prev).num_days() {
                1 => current + 1,
                gap if gap > 1 => 1,
                _ => current,
            },
        };
        prev_day = Some(day);
        longest = longest.max(current);
    }

    (current, longest)
}

pub fn trend_points(entries: &[DiaryEntry]) -> Vec<TrendPoint> {
    entries
        .iter()
        .map(|e| TrendPoint {
            date: e.created_at,
            mood: e.mood,
        })
        .collect()
}

#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn EntryStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    async fn window(&self, user_id: Uuid, days: i64) -> DiaryResult<Vec<DiaryEntry>> {
        let since = Utc::now() - Duration::days(days);
        Ok(self.store.list_entries_since(user_id, since).await?)
    }

    pub async fn mood_counts(&self, user_id: Uuid, days: i64) -> DiaryResult<MoodStats> {
        let entries = self.window(user_id, days).await?;
        Ok(MoodStats {
            days,
            counts: count_moods(&entries),
        })
    }

    pub async fn streaks(&self, user_id: Uuid, days: i64) -> DiaryResult<StreakStats> {
        let entries = self.window(user_id, days).await?;
        let (current_streak, longest_streak) = compute_streaks(&entries);
        Ok(StreakStats {
            days,
            current_streak,
            longest_streak,
        })
    }

    pub async fn trends(&self, user_id: Uuid, days: i64) -> DiaryResult<Vec<TrendPoint>> {
        let entries = self.window(user_id, days).await?;
        Ok(trend_points(&entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use chrono::TimeZone;

    fn entry_on(user_id: Uuid, y: i32, m: u32, d: u32, mood: Option<MoodLabel>) -> DiaryEntry {
        let created_at = Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap();
        DiaryEntry {
            id: Uuid::new_v4(),
            user_id,
            text: "entry".into(),
            mood,
            occurred_on: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_window_days_parsing() {
        assert_eq!(window_days(None, 30), 30);
        assert_eq!(window_days(Some("14"), 30), 14);
        assert_eq!(window_days(Some("abc"), 7), 7);
        assert_eq!(window_days(Some("0"), 7), 7);
        assert_eq!(window_days(Some("-5"), 30), 30);
        assert_eq!(window_days(Some("999999"), 30), MAX_WINDOW_DAYS);
    }

    #[test]
    fn test_count_moods_skips_missing() {
        let user = Uuid::new_v4();
        let entries = vec![
            entry_on(user, 2025, 9, 1, Some(MoodLabel::Happy)),
            entry_on(user, 2025, 9, 2, Some(MoodLabel::Happy)),
            entry_on(user, 2025, 9, 3, Some(MoodLabel::Sad)),
            entry_on(user, 2025, 9, 4, None),
        ];
        let counts = count_moods(&entries);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&MoodLabel::Happy], 2);
        assert_eq!(counts[&MoodLabel::Sad], 1);
        assert_eq!(counts.values().sum::<u32>(), 3);
    }

    #[test]
    fn test_streak_resets_after_gap() {
        let user = Uuid::new_v4();
        let entries = vec![
            entry_on(user, 2025, 9, 1, Some(MoodLabel::Happy)),
            entry_on(user, 2025, 9, 2, Some(MoodLabel::Sad)),
            entry_on(user, 2025, 9, 3, Some(MoodLabel::Excited)),
            entry_on(user, 2025, 9, 6, Some(MoodLabel::Neutral)),
        ];
        assert_eq!(compute_streaks(&entries), (1, 3));
    }

    #[test]
    fn test_streak_spans_month_boundary() {
        let user = Uuid::new_v4();
        let entries = vec![
            entry_on(user, 2025, 8, 30, None),
            entry_on(user, 2025, 8, 31, None),
            entry_on(user, 2025, 9, 1, None),
        ];
        assert_eq!(compute_streaks(&entries), (3, 3));
    }

    #[test]
    fn test_streak_same_day_is_unchanged() {
        let user = Uuid::new_v4();
        let mut second = entry_on(user, 2025, 9, 2, None);
        second.created_at = Utc.with_ymd_and_hms(2025, 9, 2, 21, 0, 0).unwrap();
        let entries = vec![
            entry_on(user, 2025, 9, 1, None),
            entry_on(user, 2025, 9, 2, None),
            second,
            entry_on(user, 2025, 9, 3, None),
        ];
        assert_eq!(compute_streaks(&entries), (3, 3));
    }

    #[test]
    fn test_streak_empty() {
        assert_eq!(compute_streaks(&[]), (0, 0));
    }

    #[test]
    fn test_trend_points_keep_order_and_missing_moods() {
        let user = Uuid::new_v4();
        let entries = vec![
            entry_on(user, 2025, 9, 1, Some(MoodLabel::Happy)),
            entry_on(user, 2025, 9, 2, None),
        ];
        let points = trend_points(&entries);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].mood, Some(MoodLabel::Happy));
        assert_eq!(points[0].date, entries[0].created_at);
        assert_eq!(points[1].mood, None);
    }

    #[tokio::test]
    async fn test_window_excludes_old_entries() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let now = Utc::now();

        for days_ago in [1i64, 2, 3, 40] {
            let created_at = now - Duration::days(days_ago);
            store
                .import_entry(DiaryEntry {
                    id: Uuid::new_v4(),
                    user_id: user,
                    text: "past".into(),
                    mood: Some(MoodLabel::Happy),
                    occurred_on: created_at.date_naive(),
                    created_at,
                    updated_at: created_at,
                })
                .await
                .unwrap();
        }

        let stats = StatsService::new(Arc::new(store));
        let moods = stats.mood_counts(user, 30).await.unwrap();
        assert_eq!(moods.days, 30);
        assert_eq!(moods.counts[&MoodLabel::Happy], 3);

        let streak = stats.streaks(user, 30).await.unwrap();
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.longest_streak, 3);

        let trends = stats.trends(user, 7).await.unwrap();
        assert_eq!(trends.len(), 3);
        assert!(trends.windows(2).all(|w| w[0].date <= w[1].date));
    }
}
