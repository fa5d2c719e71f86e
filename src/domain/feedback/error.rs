/// Local validation failures. These block submission before any service call
/// and are never surfaced as a distinct banner: the form simply does not
/// submit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i32),
}
