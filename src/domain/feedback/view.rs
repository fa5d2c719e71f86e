use super::feed::RecentFeed;
use super::model::{Draft, FeedbackEntry, NewFeedback};
use super::service::FeedbackStore;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long the transient success banner stays up.
pub const SUCCESS_BANNER_WINDOW: Duration = Duration::from_secs(3);

/// Fallback shown when the feed cannot be loaded or the service is not
/// configured.
pub const UNAVAILABLE_NOTICE: &str =
    "Recent feedback is unavailable right now. Please contact me directly.";

/// Submission lifecycle: Idle -> Submitting -> Success -> Idle.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Success,
}

/// Initial feed fetch lifecycle, independent of the submission state.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    Loading,
    Loaded,
    LoadFailed(String),
}

/// In-memory state of the feedback section: the draft under edit, the
/// submission state machine, and the bounded newest-first feed.
pub struct FeedbackView {
    store: Arc<dyn FeedbackStore>,
    pub draft: Draft,
    submit_state: SubmitState,
    feed_state: FeedState,
    feed: RecentFeed,
    banner_expires_at: Option<Instant>,
}

impl FeedbackView {
    pub fn new(store: Arc<dyn FeedbackStore>, feed_cap: usize) -> Self {
        Self {
            store,
            draft: Draft::default(),
            submit_state: SubmitState::Idle,
            feed_state: FeedState::Loading,
            feed: RecentFeed::new(feed_cap),
            banner_expires_at: None,
        }
    }

    /// Initial feed fetch. A failure is recovered locally: the feed section
    /// degrades to the contact fallback, it never propagates.
    pub async fn load(&mut self) {
        match self.store.list_recent(self.feed.cap() as i64).await {
            Ok(entries) => {
                self.feed.replace(entries);
                self.feed_state = FeedState::Loaded;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load recent feedback");
                self.feed_state = FeedState::LoadFailed(UNAVAILABLE_NOTICE.to_string());
            }
        }
    }

    /// Submits the current draft. A draft that fails local validation is
    /// rejected without any state change or service call, and a submit while
    /// one is already in flight is a no-op.
    ///
    /// Write failures are acknowledged to the visitor as success; the real
    /// error is logged at error level for operators only.
    pub async fn submit(&mut self) {
        if self.submit_state == SubmitState::Submitting {
            return;
        }

        let feedback = match NewFeedback::from_draft(&self.draft) {
            Ok(feedback) => feedback,
            Err(err) => {
                tracing::debug!(error = %err, "rejecting feedback submission");
                return;
            }
        };

        self.submit_state = SubmitState::Submitting;

        match self.store.insert(&feedback).await {
            Ok(entry) => {
                // Confirmed prepend; the later push echo of this row is
                // deduplicated by id in the merge.
                self.feed.merge(entry);
            }
            Err(err) => {
                tracing::error!(error = %err, "feedback insert failed");
            }
        }

        self.draft = Draft::default();
        self.submit_state = SubmitState::Success;
        self.banner_expires_at = Some(Instant::now() + SUCCESS_BANNER_WINDOW);
    }

    /// Merges a push-delivered entry into the feed. Returns false when the
    /// entry was already present (no-op).
    pub fn apply_push(&mut self, entry: FeedbackEntry) -> bool {
        self.feed.merge(entry)
    }

    /// Advances time-based transitions: dismisses the success banner once its
    /// window has passed and returns the form to Idle.
    pub fn tick(&mut self, now: Instant) {
        if self.submit_state != SubmitState::Success {
            return;
        }
        if matches!(self.banner_expires_at, Some(expires_at) if now >= expires_at) {
            self.submit_state = SubmitState::Idle;
            self.banner_expires_at = None;
        }
    }

    pub fn banner_visible(&self) -> bool {
        self.submit_state == SubmitState::Success
    }

    pub fn submit_state(&self) -> &SubmitState {
        &self.submit_state
    }

    pub fn feed_state(&self) -> &FeedState {
        &self.feed_state
    }

    pub fn feed(&self) -> &RecentFeed {
        &self.feed
    }
}
