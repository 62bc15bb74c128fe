use super::domain::{InterviewSession, SessionId};

/// Boundary to the hosting application's rating storage.
///
/// The engine never writes; a source only hands over a session's ratings.
pub trait RatingSource: Send + Sync {
    fn session(&self, id: &SessionId) -> Result<Option<InterviewSession>, SourceError>;
}

/// Error enumeration for rating source failures.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("rating source unavailable: {0}")]
    Unavailable(String),
}
