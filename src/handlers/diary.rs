use axum::{extract::State, http::StatusCode, Extension, Json};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{CreateEntryRequest, UpdateEntryRequest};
use crate::error::AppResult;
use crate::models::diary_entry::EntryResponse;
use crate::AppState;

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<(StatusCode, Json<EntryResponse>)> {
    body.validate()?;
    let mood = body.mood()?;

    let entry = state.diary.create_today(auth_user.id, body.text, mood).await?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// `null` when nothing has been written today; the client uses that to
/// choose between the create and edit forms.
pub async fn get_today(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Option<EntryResponse>>> {
    let entry = state.diary.get_today(auth_user.id).await?;
    Ok(Json(entry.map(Into::into)))
}

pub async fn update_today(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpdateEntryRequest>,
) -> AppResult<Json<EntryResponse>> {
    body.validate()?;
    let mood = body.mood()?;

    let entry = state.diary.update_today(auth_user.id, body.text, mood).await?;

    Ok(Json(entry.into()))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<EntryResponse>>> {
    let entries = state.diary.list(auth_user.id).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
