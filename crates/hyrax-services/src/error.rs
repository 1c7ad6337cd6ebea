use hyrax_core::enums::UseRelation;
use hyrax_core::{CoreError, Id, PersistError};

/// Failures of a [`crate::FileActor`] operation.
///
/// Every variant is logged by the actor before it is returned.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    #[error("File set has no id")]
    UnsavedFileSet,

    #[error("Failed to save file set {file_set_id}: {source}")]
    SaveFailed {
        file_set_id: String,
        #[source]
        source: PersistError,
    },

    #[error("Failed to create file node for file set {file_set_id}: {source}")]
    NodeCreation {
        file_set_id: String,
        #[source]
        source: PersistError,
    },

    #[error("No {relation} returned for file set {file_set_id}")]
    NoRelatedFile {
        file_set_id: String,
        relation: UseRelation,
    },

    #[error("Unknown revision '{revision}' for file {file_id}")]
    UnknownRevision { file_id: Id, revision: String },

    #[error("Unrecognized file relation '{0}'")]
    UnknownRelation(String),

    #[error("Failed to record version: {0}")]
    Versioning(#[source] PersistError),

    #[error("Failed to enqueue characterization: {0}")]
    Enqueue(#[source] PersistError),
}

/// Failures while pushing visibility to members.
#[derive(Debug, thiserror::Error)]
pub enum PropagationError {
    #[error("Failed to save member {member_id}: {source}")]
    SaveFailed {
        member_id: String,
        #[source]
        source: PersistError,
    },

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
