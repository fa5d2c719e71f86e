use super::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_RATING: i32 = 5;

/// A persisted visitor submission. `id` and `created_at` are assigned by the
/// data service at insert time and are never client-generated. Entries are
/// immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FeedbackEntry {
    pub id: Uuid,
    pub name: Option<String>,
    pub message: String,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl FeedbackEntry {
    /// Null or blank names render as "Anonymous".
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Anonymous")
    }
}

/// In-progress, unsaved values of the submission form.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub message: String,
    pub rating: i32,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            rating: DEFAULT_RATING,
        }
    }
}

/// A validated submission, ready for a single-row insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub name: String,
    /// Absent rather than empty: a blank email must be stored as NULL, never
    /// as a present-but-blank string.
    pub email: Option<String>,
    pub message: String,
    pub rating: i32,
}

impl NewFeedback {
    /// Normalizes and validates a draft. This is the only path from form
    /// input to an insert, so the repository never sees an empty name or
    /// message, or a rating outside [1,5].
    pub fn from_draft(draft: &Draft) -> Result<Self, ValidationError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let message = draft.message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        if !(1..=5).contains(&draft.rating) {
            return Err(ValidationError::RatingOutOfRange(draft.rating));
        }

        let email = Some(draft.email.trim())
            .filter(|email| !email.is_empty())
            .map(str::to_string);

        Ok(Self {
            name: name.to_string(),
            email,
            message: message.to_string(),
            rating: draft.rating,
        })
    }
}
