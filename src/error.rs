use thiserror::Error;

/// Error type for profile construction, computation and editing.
#[derive(Error, Debug, Clone, PartialEq, uniffi::Error)]
#[uniffi(flat_error)]
pub enum ProfileError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("{operation} requires the `{column}` column")]
    MissingDependency {
        operation: &'static str,
        column: &'static str,
    },

    #[error("segment {0} does not exist")]
    NotFound(String),
}

impl ProfileError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        ProfileError::Configuration(message.into())
    }

    pub(crate) fn missing(operation: &'static str, column: &'static str) -> Self {
        ProfileError::MissingDependency { operation, column }
    }
}
