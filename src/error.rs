use thiserror::Error;

/// An argument failed a shape check at the start of a public operation.
///
/// These are caller bugs: raised synchronously, never retried, never
/// swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`{param}` must be a non-empty string")]
    EmptyString { param: &'static str },
}

/// Errors surfaced by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The host's native listener or dispatch facility failed.
    #[error("host event facility failed")]
    Host(#[source] anyhow::Error),
}

pub(crate) fn non_empty(param: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::EmptyString { param })
    } else {
        Ok(())
    }
}
