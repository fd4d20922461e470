use axum::{extract::State, http::StatusCode, Extension, Json};
use validator::Validate;

use crate::auth::{
    jwt::create_access_token,
    middleware::AuthUser,
    password::{hash_password, verify_password},
};
use crate::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::{AppError, AppResult};
use crate::models::user::{NewUser, User, UserProfile};
use crate::store::StoreError;
use crate::AppState;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn auth_response(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let token = create_access_token(user.id, &user.email, &state.config)?;
    Ok(AuthResponse {
        token,
        expires_in: state.config.jwt_ttl_secs,
        user: user.into(),
    })
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    body.validate()?;

    let password_hash = hash_password(&body.password)?;
    let user = state
        .users
        .create_user(NewUser {
            username: body.username.trim().to_string(),
            email: normalize_email(&body.email),
            password_hash,
        })
        .await
        .map_err(|e| match e {
            StoreError::Duplicate => AppError::Conflict("Email already registered".into()),
            other => AppError::StorageUnavailable(other),
        })?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(auth_response(&state, user)?)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state
        .users
        .find_user_by_email(&normalize_email(&body.email))
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&body.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Login rejected: bad password");
        return Err(AppError::Unauthorized);
    }

    Ok(Json(auth_response(&state, user)?))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .users
        .find_user_by_id(auth_user.id)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}
