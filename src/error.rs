use thiserror::Error;

/// Errors that can occur while configuring a transport
///
/// Listener registration and dispatch never fail; only configuration input
/// (action names, JSON documents) is validated.
#[derive(Error, Debug)]
pub enum Error {
    /// Action name that can never be dispatched (empty or whitespace)
    #[error("invalid action name: {0:?}")]
    InvalidAction(String),

    /// JSON configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for transport operations
pub type Result<T> = std::result::Result<T, Error>;
