use crate::domain::feedback::{FeedbackEntry, FeedbackStore, NewFeedback};
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use sqlx::postgres::PgListener;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// NOTIFY channel the feedback table's insert trigger publishes on.
pub const FEEDBACK_CHANNEL: &str = "feedback_inserts";

pub struct FeedbackRepository {
    pool: Arc<DbPool>,
}

impl FeedbackRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Recent entries, newest first, truncated to `limit`.
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<FeedbackEntry>> {
        let pool = self.pool.as_ref();
        sqlx::query_as::<_, FeedbackEntry>(
            r#"
            SELECT id, name, message, rating, created_at
            FROM feedback
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::FetchFailed(e.to_string()))
    }

    /// Single-row insert returning the persisted row, so the server-assigned
    /// `id` and `created_at` are available without a second round trip.
    pub async fn insert(&self, feedback: &NewFeedback) -> AppResult<FeedbackEntry> {
        let pool = self.pool.as_ref();
        sqlx::query_as::<_, FeedbackEntry>(
            r#"
            INSERT INTO feedback (name, email, message, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, message, rating, created_at
            "#,
        )
        .bind(&feedback.name)
        .bind(&feedback.email)
        .bind(&feedback.message)
        .bind(feedback.rating)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InsertFailed(e.to_string()))
    }

    /// Opens a push channel for newly inserted rows, delivered in the order
    /// the service emits them. The subscription must be cancelled (or
    /// dropped) on teardown so the listening connection is released.
    pub async fn subscribe_inserts(&self) -> AppResult<InsertSubscription> {
        let mut listener = PgListener::connect_with(self.pool.as_ref()).await?;
        listener.listen(FEEDBACK_CHANNEL).await?;

        let (tx, rx) = mpsc::channel(64);
        let listener_task = tokio::spawn(async move {
            loop {
                match listener.recv().await {
                    Ok(notification) => {
                        // Typed parse at the boundary: payloads that don't
                        // match the expected row shape are logged and
                        // discarded, never propagated.
                        match serde_json::from_str::<FeedbackEntry>(notification.payload()) {
                            Ok(entry) => {
                                if tx.send(entry).await.is_err() {
                                    break;
                                }
                            }
                            Err(err) => {
                                tracing::warn!(
                                    error = %err,
                                    payload = notification.payload(),
                                    "discarding malformed feedback event"
                                );
                            }
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "feedback push channel closed");
                        break;
                    }
                }
            }
        });

        Ok(InsertSubscription { rx, listener_task })
    }
}

#[async_trait]
impl FeedbackStore for FeedbackRepository {
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<FeedbackEntry>> {
        FeedbackRepository::list_recent(self, limit).await
    }

    async fn insert(&self, feedback: &NewFeedback) -> AppResult<FeedbackEntry> {
        FeedbackRepository::insert(self, feedback).await
    }
}

/// Handle to an open insert push channel.
pub struct InsertSubscription {
    rx: mpsc::Receiver<FeedbackEntry>,
    listener_task: JoinHandle<()>,
}

impl InsertSubscription {
    /// Next pushed entry, in delivery order. Returns None once the channel
    /// has closed.
    pub async fn next(&mut self) -> Option<FeedbackEntry> {
        self.rx.recv().await
    }

    /// Tears down the push channel. Dropping the subscription has the same
    /// effect.
    pub fn cancel(self) {}
}

impl Drop for InsertSubscription {
    fn drop(&mut self) {
        self.listener_task.abort();
    }
}
