pub mod error;
pub mod feed;
pub mod model;
pub mod service;
pub mod view;

pub use error::ValidationError;
pub use feed::RecentFeed;
pub use model::{Draft, FeedbackEntry, NewFeedback, DEFAULT_RATING};
pub use service::FeedbackStore;
pub use view::{FeedState, FeedbackView, SubmitState, SUCCESS_BANNER_WINDOW, UNAVAILABLE_NOTICE};
