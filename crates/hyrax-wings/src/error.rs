use hyrax_core::{CoreError, PersistError};

/// Errors from transforming between legacy objects and resources.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// No legacy type is registered under this internal resource name.
    #[error("No legacy model registered for '{0}'")]
    UnknownModel(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// Minting or a query-service lookup failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
}
