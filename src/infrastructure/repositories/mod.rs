mod feedback_repository;

pub use feedback_repository::{FeedbackRepository, InsertSubscription, FEEDBACK_CHANNEL};
