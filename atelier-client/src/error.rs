//! Client error types

use thiserror::Error;

/// Banner text for transport failures
pub const CONNECTION_ERROR: &str = "Erreur de connexion au serveur";

/// Banner text when nothing better is known
pub const UNEXPECTED_ERROR: &str = "Une erreur inattendue s'est produite";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, TLS...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the body's `message` field when present
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    /// 2xx response carrying `success: false`
    #[error("Request rejected: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// Body is not the JSON we expect
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Base URL cannot be used
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading an upload from disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected before sending (upload checks)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any of the above, tagged with the message of the failed operation
    #[error("{fallback}: {source}")]
    Operation {
        fallback: &'static str,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Attach the operation's fallback message (keeps the first one attached)
    pub fn with_fallback(self, fallback: &'static str) -> Self {
        match self {
            ClientError::Operation { .. } => self,
            other => ClientError::Operation {
                fallback,
                source: Box::new(other),
            },
        }
    }

    /// The error underneath any fallback tag
    pub fn root(&self) -> &ClientError {
        match self {
            ClientError::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message sent by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self.root() {
            ClientError::Api { message, .. } | ClientError::Rejected { message } => {
                message.as_deref().map(str::trim).filter(|m| !m.is_empty())
            }
            _ => None,
        }
    }

    /// Text for the screen banner
    ///
    /// Server message first, then the operation's fallback. Transport
    /// failures always read as a connection error.
    pub fn user_message(&self) -> String {
        let fallback = match self {
            ClientError::Operation { fallback, .. } => Some(*fallback),
            _ => None,
        };
        match self.root() {
            ClientError::Http(_) => CONNECTION_ERROR.to_string(),
            ClientError::Validation(message) => message.clone(),
            _ => self
                .server_message()
                .or(fallback)
                .unwrap_or(UNEXPECTED_ERROR)
                .to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// `map_err` adapter attaching a fallback message
pub(crate) fn fallback(message: &'static str) -> impl FnOnce(ClientError) -> ClientError {
    move |err| err.with_fallback(message)
}
