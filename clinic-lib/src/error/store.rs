//! Event store errors

use trellis::calendar::EventId;

use super::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No event has the given id.
    #[error("appointment '{0}' not found")]
    NotFound(EventId),

    /// The submitted values were rejected.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
