use super::model::FeedbackEntry;
use uuid::Uuid;

/// The bounded, ordered, newest-first in-memory window of feedback entries.
///
/// `created_at` ordering is authoritative for the initial load; pushed
/// entries are merged with a prepend-and-cap policy that assumes delivery
/// order approximates `created_at` descending, so the window is never
/// re-sorted on push.
#[derive(Debug, Clone)]
pub struct RecentFeed {
    entries: Vec<FeedbackEntry>,
    cap: usize,
}

impl RecentFeed {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Vec::with_capacity(cap),
            cap,
        }
    }

    /// Replaces the window with a freshly fetched feed, truncating to the cap.
    pub fn replace(&mut self, entries: Vec<FeedbackEntry>) {
        self.entries = entries;
        self.entries.truncate(self.cap);
    }

    /// Merges one entry into the window. Idempotent by `id`: a duplicate of
    /// an entry already in the window (e.g. the push echo of this client's
    /// own insert) is discarded and `false` is returned. Otherwise the entry
    /// is prepended and the oldest entries beyond the cap are evicted.
    pub fn merge(&mut self, entry: FeedbackEntry) -> bool {
        if self.contains(entry.id) {
            return false;
        }

        self.entries.insert(0, entry);
        self.entries.truncate(self.cap);
        true
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[FeedbackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
