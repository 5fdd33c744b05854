//! Error types surfaced to the view-models.
//!
//! There are exactly two failure domains: the feed client ([`FeedError`])
//! and the identity provider ([`AuthError`]).  Both are `Clone + PartialEq`
//! so a view-model can hold on to the last error for display and tests can
//! assert that a supplied error comes back unchanged.

use thiserror::Error;

/// Failure of a feed fetch, either on the wire or while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server responded with HTTP {0}")]
    Status(u16),
    #[error("could not decode feed: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FeedError::Status(status.as_u16()),
            None if e.is_decode() => FeedError::Decode(e.to_string()),
            None => FeedError::Transport(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Decode(e.to_string())
    }
}

/// Failure reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("identity provider error: {0}")]
    Provider(String),
    #[error("identity provider unreachable: {0}")]
    Transport(String),
    #[error("identity provider returned no token")]
    MissingToken,
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Transport(e.to_string())
    }
}

/// Any error a screen can end up displaying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl AppError {
    /// Feed failures are offered a retry; auth failures are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Feed(_))
    }

    /// Whether asking again can help: any feed failure, or an identity
    /// provider that could not be reached.  Provider refusals stay final.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Feed(_) | AppError::Auth(AuthError::Transport(_)))
    }
}
