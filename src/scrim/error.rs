use thiserror::Error;

/// Failures of the scrim lifecycle operations. Every variant carries a
/// message distinct enough for the UI to tell "you already requested this"
/// from "this scrim no longer exists" from "retry".
#[derive(Debug, Error)]
pub enum ScrimError {
    #[error("{0}")]
    Validation(String),

    #[error("You have already requested this scrim")]
    DuplicateRequest,

    #[error("You cannot request a scrim proposed by your own team")]
    SelfRequest,

    #[error("This was already handled, refresh and try again")]
    AlreadyHandled,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(String),

    #[error("Something went wrong, please retry")]
    Store(#[from] sqlx::Error),
}

impl ScrimError {
    /// Map a failed insert against the scrim_requests uniqueness constraint
    /// (one pending request per scrim and team) to the domain error.
    pub fn from_request_insert(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => ScrimError::DuplicateRequest,
            _ => ScrimError::Store(e),
        }
    }
}
