use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Any 401, from any endpoint. By the time this is returned the
    /// pipeline has already torn the client-side session down.
    #[error("Unauthorized: the session has been invalidated")]
    Auth,
    /// The request to the backend failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend returned a non-401 error status. Carries the
    /// backend-supplied `detail` text when the body had one, otherwise a
    /// generic message.
    #[error("Backend error: {1} (Status {0})")]
    Backend(reqwest::StatusCode, String),
    /// Reading or writing the persisted token slot failed.
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
    /// The response shape violated the API contract (e.g. an empty
    /// profile list from `/users/me`).
    #[error("Invariant: {0}")]
    Invariant(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
