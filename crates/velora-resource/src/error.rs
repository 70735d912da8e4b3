use thiserror::Error;

use velora_client::ApiError;
use velora_core::CoreError;

/// Errors surfaced by resource store operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid payload: {0}")]
    Payload(#[from] CoreError),
}

impl ResourceError {
    /// Message to show the user for a failed operation.
    pub fn user_message(&self, operation: &str, resource: &str) -> String {
        match self {
            Self::Api(err) => err.user_message(operation, resource),
            Self::Payload(err) => err.to_string(),
        }
    }
}

pub type ResourceResult<T> = std::result::Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_passthrough() {
        let err = ResourceError::Api(ApiError::Status {
            status: 409,
            message: "HTTP 409".to_string(),
            server_detail: Some("Supplier name taken".to_string()),
        });
        assert_eq!(
            err.user_message("creating", "suppliers"),
            "Supplier name taken"
        );
    }

    #[test]
    fn test_payload_error_message() {
        let err = ResourceError::Payload(CoreError::EmptyPatch);
        assert!(err.user_message("updating", "suppliers").contains("Empty patch"));
    }
}
