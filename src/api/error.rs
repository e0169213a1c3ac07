use reqwest::StatusCode;
use thiserror::Error;

/// Failures the remote book service can hand back to the UI. The taxonomy is
/// deliberately small: either the request never completed (transport, which
/// also covers a body that fails to decode), or the server answered with a
/// status outside the 2xx range.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    UnexpectedStatus(StatusCode),
}
