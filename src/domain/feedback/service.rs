use super::model::{FeedbackEntry, NewFeedback};
use crate::error::AppResult;
use async_trait::async_trait;

/// Seam between the view model and the data service. Implemented by the
/// feedback repository in production and by in-memory doubles in tests.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Recent entries, newest first, truncated to `limit`. Zero rows is a
    /// valid non-error state.
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<FeedbackEntry>>;

    /// Single-row insert returning the persisted entry with its
    /// server-assigned `id` and `created_at`.
    async fn insert(&self, feedback: &NewFeedback) -> AppResult<FeedbackEntry>;
}
