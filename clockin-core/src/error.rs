use thiserror::Error;

/// Failure of an attendance backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The identifier does not resolve to any staff record.
    #[error("staff not found")]
    NotFound,

    /// The backend refused the request on business grounds, optionally saying why.
    #[error("rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),

    /// The backend could not be reached or answered with something unreadable.
    #[error("transport error: {0}")]
    Transport(String),
}

impl BackendError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(Some(message.into()))
    }

    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}
