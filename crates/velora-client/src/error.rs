use thiserror::Error;

/// Errors surfaced by the REST client.
///
/// `Network` means the request never reached the server (or the connection
/// died mid-flight); `Status` is a non-2xx response, carrying whatever
/// human-readable message the server put in the body; `Decode` is a 2xx
/// whose body did not match the expected shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        message: String,
        /// Raw server-provided detail when the body carried one.
        server_detail: Option<String>,
    },

    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Unsupported base URL scheme \"{0}\": expected http or https")]
    UnsupportedScheme(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message to show the user for a failed operation.
    ///
    /// Server detail verbatim when present, otherwise a generic
    /// per-operation fallback like "Error creating patients".
    pub fn user_message(&self, operation: &str, resource: &str) -> String {
        match self {
            Self::Status {
                server_detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Network(_) => "Connection failed. Please try again.".to_string(),
            _ => format!("Error {operation} {resource}"),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
