use thiserror::Error;

/// Core error types for Velora client operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid resource name: {0}")]
    InvalidResourceName(String),

    #[error("Invalid entity id: {0}")]
    InvalidId(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Time parsing error: {0}")]
    TimeError(#[from] time::error::Parse),

    #[error("Entity not found: {resource}/{id}")]
    NotFound { resource: String, id: String },

    #[error("Invalid entity data: {message}")]
    InvalidEntity { message: String },

    #[error("Empty patch: at least one field must be set")]
    EmptyPatch,
}

impl CoreError {
    /// Create a new InvalidResourceName error
    pub fn invalid_resource_name(resource: impl Into<String>) -> Self {
        Self::InvalidResourceName(resource.into())
    }

    /// Create a new InvalidId error
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }

    /// Create a new NotFound error
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create a new InvalidEntity error
    pub fn invalid_entity(message: impl Into<String>) -> Self {
        Self::InvalidEntity {
            message: message.into(),
        }
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidResourceName(_) | Self::InvalidId(_) | Self::InvalidEntity { .. } => {
                ErrorCategory::Validation
            }
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::JsonError(_) => ErrorCategory::Serialization,
            Self::TimeError(_) => ErrorCategory::Serialization,
            Self::EmptyPatch => ErrorCategory::Validation,
        }
    }
}

/// Error categories for monitoring and classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Serialization,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
            Self::Serialization => write!(f, "serialization"),
        }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CoreError::invalid_resource_name("Bad/Name");
        assert_eq!(err.to_string(), "Invalid resource name: Bad/Name");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_not_found_error() {
        let err = CoreError::not_found("patients", "123");
        assert_eq!(err.to_string(), "Entity not found: patients/123");
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("{ nope }").unwrap_err();
        let core_err: CoreError = json_err.into();

        assert!(matches!(core_err, CoreError::JsonError(_)));
        assert_eq!(core_err.category(), ErrorCategory::Serialization);
    }

    #[test]
    fn test_error_categories_display() {
        assert_eq!(ErrorCategory::Validation.to_string(), "validation");
        assert_eq!(ErrorCategory::NotFound.to_string(), "not_found");
        assert_eq!(ErrorCategory::Serialization.to_string(), "serialization");
    }
}
