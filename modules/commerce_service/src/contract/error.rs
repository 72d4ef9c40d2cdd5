//! Contract error types for the commerce service
//!
//! These errors are transport-agnostic and used for inter-module communication.

/// Commerce service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommerceError {
    /// The request is structurally invalid (e.g. a required reference id is missing)
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Validation error message
        message: String,
    },
    /// A referenced entity does not exist
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource kind (user, product, order, category)
        resource: String,
        /// Identifier that failed to resolve
        id: i64,
    },
    /// A write would break a referential or uniqueness constraint
    #[error("Database constraint violation: {message}")]
    ConstraintViolation {
        /// Message reported by the database
        message: String,
    },
    /// Unclassified persistence failure
    #[error("Internal error")]
    Internal,
}

impl CommerceError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: i64) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id,
        }
    }
}
