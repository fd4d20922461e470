//! Request/response shapes for the HTTP API.
//!
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Field validation is expressed via `validator` derive macros; mood labels
//!   are parsed by the handlers so unknown labels get the standard error envelope

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::models::mood::MoodLabel;
use crate::models::user::UserProfile;

pub const MAX_ENTRY_CHARS: usize = 10_000;

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/register
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 254, message = "Email too long"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// POST /api/auth/login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: UserProfile,
}

// ============================================================================
// Diary
// ============================================================================

/// POST /api/diary
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    #[validate(custom = "validate_entry_text")]
    pub text: Option<String>,

    pub mood: Option<String>,
}

/// PUT /api/diary/today — both fields optional
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateEntryRequest {
    #[validate(custom = "validate_entry_text")]
    pub text: Option<String>,

    pub mood: Option<String>,
}

impl CreateEntryRequest {
    pub fn mood(&self) -> AppResult<Option<MoodLabel>> {
        parse_mood(self.mood.as_deref())
    }
}

impl UpdateEntryRequest {
    pub fn mood(&self) -> AppResult<Option<MoodLabel>> {
        parse_mood(self.mood.as_deref())
    }
}

fn validate_entry_text(text: &str) -> Result<(), ValidationError> {
    if text.chars().count() > MAX_ENTRY_CHARS {
        let mut err = ValidationError::new("length");
        err.message = Some(format!("Entry must be at most {MAX_ENTRY_CHARS} characters").into());
        return Err(err);
    }
    Ok(())
}

fn parse_mood(raw: Option<&str>) -> AppResult<Option<MoodLabel>> {
    MoodLabel::parse_optional(raw).map_err(|e| AppError::Validation(e.to_string()))
}

// ============================================================================
// Stats
// ============================================================================

/// `?days=N` on the stats endpoints. Kept as a string so junk values fall
/// back to the endpoint default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub days: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let ok = RegisterRequest {
            username: "ana".into(),
            email: "ana@example.com".into(),
            password: "long-enough".into(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".into(),
            ..ok
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        let req = RegisterRequest {
            username: "ana".into(),
            email: "ana@example.com".into(),
            password: "short".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_unknown_mood_is_validation_error() {
        let req = CreateEntryRequest {
            text: Some("hello there".into()),
            mood: Some("Calm".into()),
        };
        assert!(matches!(req.mood(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_entry_length_limit() {
        let req = UpdateEntryRequest {
            text: Some("x".repeat(MAX_ENTRY_CHARS + 1)),
            mood: None,
        };
        assert!(req.validate().is_err());

        let at_limit = UpdateEntryRequest {
            text: Some("x".repeat(MAX_ENTRY_CHARS)),
            mood: None,
        };
        assert!(at_limit.validate().is_ok());
    }
}
