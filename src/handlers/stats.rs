use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::dto::StatsQuery;
use crate::error::AppResult;
use crate::services::stats::{
    window_days, MoodStats, StreakStats, TrendPoint, DEFAULT_MOOD_WINDOW_DAYS,
    DEFAULT_STREAK_WINDOW_DAYS, DEFAULT_TREND_WINDOW_DAYS,
};
use crate::AppState;

pub async fn get_mood_counts(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<MoodStats>> {
    let days = window_days(query.days.as_deref(), DEFAULT_MOOD_WINDOW_DAYS);
    Ok(Json(state.stats.mood_counts(auth_user.id, days).await?))
}

pub async fn get_streak(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<StreakStats>> {
    let days = window_days(query.days.as_deref(), DEFAULT_STREAK_WINDOW_DAYS);
    Ok(Json(state.stats.streaks(auth_user.id, days).await?))
}

pub async fn get_trends(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<Vec<TrendPoint>>> {
    let days = window_days(query.days.as_deref(), DEFAULT_TREND_WINDOW_DAYS);
    Ok(Json(state.stats.trends(auth_user.id, days).await?))
}
