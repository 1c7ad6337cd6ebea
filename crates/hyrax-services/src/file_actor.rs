//! File ingestion and revert for one file set and use relation.
//!
//! A [`FileActor`] routes ingestion through whichever persistence back-end is
//! configured:
//!
//! - **legacy**: attach the content to the file set, save it, snapshot a
//!   version, enqueue characterization
//! - **resource**: build and persist a [`FileNode`] (upload + save), record a
//!   version, enqueue characterization
//!
//! Failures never panic. They are logged here and returned as [`ActorError`];
//! no version is recorded and no job is enqueued after a failed save.

use std::fmt;
use std::sync::Arc;

use hyrax_core::entities::{FileNode, PcdmFile};
use hyrax_core::enums::{PersistenceMode, RelationPolicy, UseRelation};
use hyrax_core::{Id, Job, JobQueue, JobReceipt, LegacyObject, LegacyStore, PersistError};

use crate::error::ActorError;
use crate::file_node_builder::FileNodeBuilder;
use crate::io::JobIoWrapper;
use crate::versioning::VersioningService;

// ---------------------------------------------------------------------------
// Relation normalization
// ---------------------------------------------------------------------------

/// A use relation as callers supply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationInput {
    Canonical(UseRelation),
    /// A symbol-like name (`original_file`) or a vocabulary URI.
    Term(String),
}

impl RelationInput {
    /// Resolve to a canonical relation.
    ///
    /// # Errors
    ///
    /// Returns `ActorError::UnknownRelation` for an unrecognized term under
    /// [`RelationPolicy::Strict`].
    pub fn resolve(&self, policy: RelationPolicy) -> Result<UseRelation, ActorError> {
        let term = match self {
            Self::Canonical(relation) => return Ok(*relation),
            Self::Term(term) => term,
        };
        if let Some(relation) = UseRelation::from_symbol(term).or_else(|| UseRelation::from_uri(term)) {
            return Ok(relation);
        }
        match policy {
            RelationPolicy::DefaultToOriginal => {
                tracing::warn!(relation = %term, "unrecognized file relation; using original_file");
                Ok(UseRelation::OriginalFile)
            }
            RelationPolicy::Strict => Err(ActorError::UnknownRelation(term.clone())),
        }
    }
}

impl From<UseRelation> for RelationInput {
    fn from(relation: UseRelation) -> Self {
        Self::Canonical(relation)
    }
}

impl From<&str> for RelationInput {
    fn from(term: &str) -> Self {
        Self::Term(term.to_string())
    }
}

impl From<String> for RelationInput {
    fn from(term: String) -> Self {
        Self::Term(term)
    }
}

/// The term a persistence back-end addresses `relation` by.
#[must_use]
pub const fn relation_term(relation: UseRelation, mode: PersistenceMode) -> &'static str {
    match mode {
        PersistenceMode::Legacy => relation.as_symbol(),
        PersistenceMode::Resource => relation.uri(),
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileActorState {
    NoFile,
    Ingesting,
    Ingested,
    Reverting,
    Reverted,
    Failed,
}

impl FileActorState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoFile => "no_file",
            Self::Ingesting => "ingesting",
            Self::Ingested => "ingested",
            Self::Reverting => "reverting",
            Self::Reverted => "reverted",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for FileActorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing switches, usually taken from the `persistence` config section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorSettings {
    pub mode: PersistenceMode,
    pub relation_policy: RelationPolicy,
}

/// Collaborators shared by every actor.
#[derive(Clone)]
pub struct FileActorServices {
    pub legacy_store: Arc<dyn LegacyStore>,
    pub node_builder: FileNodeBuilder,
    pub versioning: VersioningService,
    pub job_queue: Arc<dyn JobQueue>,
}

/// What a successful ingest produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Legacy path: content attached to the file set as `file_id`.
    Attached { file_id: Id, receipt: JobReceipt },
    /// Resource path: the saved file node.
    Stored { node: FileNode, receipt: JobReceipt },
}

impl IngestOutcome {
    #[must_use]
    pub const fn receipt(&self) -> &JobReceipt {
        match self {
            Self::Attached { receipt, .. } | Self::Stored { receipt, .. } => receipt,
        }
    }
}

pub struct FileActor {
    file_set: LegacyObject,
    relation: UseRelation,
    user: String,
    mode: PersistenceMode,
    state: FileActorState,
    services: FileActorServices,
}

impl FileActor {
    /// # Errors
    ///
    /// Returns `ActorError::UnknownRelation` if `relation` is unrecognized and
    /// the policy is strict.
    pub fn new(
        file_set: LegacyObject,
        relation: impl Into<RelationInput>,
        user: impl Into<String>,
        settings: ActorSettings,
        services: FileActorServices,
    ) -> Result<Self, ActorError> {
        let relation = relation.into().resolve(settings.relation_policy)?;
        let state = if file_set.file(relation).is_some() {
            FileActorState::Ingested
        } else {
            FileActorState::NoFile
        };
        Ok(Self {
            file_set,
            relation,
            user: user.into(),
            mode: settings.mode,
            state,
            services,
        })
    }

    #[must_use]
    pub const fn file_set(&self) -> &LegacyObject {
        &self.file_set
    }

    #[must_use]
    pub const fn relation(&self) -> UseRelation {
        self.relation
    }

    /// The relation as the configured back-end names it.
    #[must_use]
    pub const fn relation_term(&self) -> &'static str {
        relation_term(self.relation, self.mode)
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub const fn state(&self) -> FileActorState {
        self.state
    }

    /// Persist `io` as this actor's file and enqueue characterization.
    ///
    /// # Errors
    ///
    /// Returns `ActorError` if any persistence step fails. The error has
    /// already been logged.
    pub fn ingest_file(&mut self, io: &JobIoWrapper) -> Result<IngestOutcome, ActorError> {
        self.state = FileActorState::Ingesting;
        let result = match self.mode {
            PersistenceMode::Legacy => self.ingest_through_legacy(io),
            PersistenceMode::Resource => self.ingest_through_resource(io),
        };
        self.finish(result, FileActorState::Ingested, "ingest")
    }

    /// Restore `revision_id` of the related file and enqueue characterization.
    ///
    /// # Errors
    ///
    /// Returns `ActorError` if the file or revision is missing, or the save
    /// fails. The error has already been logged.
    pub fn revert_to(&mut self, revision_id: &str) -> Result<JobReceipt, ActorError> {
        self.state = FileActorState::Reverting;
        let result = self.revert(revision_id);
        self.finish(result, FileActorState::Reverted, "revert")
    }

    fn finish<T>(
        &mut self,
        result: Result<T, ActorError>,
        success: FileActorState,
        operation: &str,
    ) -> Result<T, ActorError> {
        match &result {
            Ok(_) => self.state = success,
            Err(error) => {
                self.state = FileActorState::Failed;
                tracing::error!(
                    %error,
                    file_set = self.file_set.id().unwrap_or("<unsaved>"),
                    relation = %self.relation,
                    mode = %self.mode,
                    operation,
                    "file actor failed"
                );
            }
        }
        result
    }

    fn file_set_id(&self) -> Result<Id, ActorError> {
        self.file_set
            .id()
            .map(Id::new)
            .ok_or(ActorError::UnsavedFileSet)
    }

    fn ingest_through_legacy(&mut self, io: &JobIoWrapper) -> Result<IngestOutcome, ActorError> {
        let file_set_id = self.file_set_id()?;
        let file_id = self.file_set.file(self.relation).map_or_else(
            || Id::new(format!("{file_set_id}/files/{}", self.relation.as_symbol())),
            |existing| existing.id.clone(),
        );

        // No auto-versioning here; the version is recorded after the save.
        let mut updated = self.file_set.clone();
        updated.attach_file(
            self.relation,
            PcdmFile {
                id: file_id.clone(),
                content: io.content().to_vec(),
                mime_type: io.mime_type().to_string(),
                original_name: io.original_name().to_string(),
            },
        );
        self.save_file_set(updated, &file_set_id)?;

        self.services
            .versioning
            .create_for_file(&file_id, &self.user)
            .map_err(ActorError::Versioning)?;
        let receipt = self.characterize(file_set_id, file_id.clone(), io.path_hint())?;
        Ok(IngestOutcome::Attached { file_id, receipt })
    }

    fn ingest_through_resource(&self, io: &JobIoWrapper) -> Result<IngestOutcome, ActorError> {
        let file_set_id = self.file_set_id()?;
        let unsaved = io.to_file_node(self.relation);

        let node = self
            .services
            .node_builder
            .create(io, unsaved, &file_set_id)
            .map_err(|source| ActorError::NodeCreation {
                file_set_id: file_set_id.to_string(),
                source,
            })?;
        let node_id = node.id.clone().ok_or_else(|| ActorError::NodeCreation {
            file_set_id: file_set_id.to_string(),
            source: PersistError::Backend("persister returned an unsaved node".into()),
        })?;

        self.services
            .versioning
            .create_for_node(&node, &self.user)
            .map_err(ActorError::Versioning)?;
        let receipt = self.characterize(file_set_id, node_id, io.path_hint())?;
        Ok(IngestOutcome::Stored { node, receipt })
    }

    fn revert(&mut self, revision_id: &str) -> Result<JobReceipt, ActorError> {
        let file_set_id = self.file_set_id()?;
        let file_id = self
            .file_set
            .file(self.relation)
            .map(|file| file.id.clone())
            .ok_or_else(|| ActorError::NoRelatedFile {
                file_set_id: file_set_id.to_string(),
                relation: self.relation,
            })?;

        let content = self
            .services
            .legacy_store
            .version_content(&file_id, revision_id)
            .map_err(ActorError::Versioning)?
            .ok_or_else(|| ActorError::UnknownRevision {
                file_id: file_id.clone(),
                revision: revision_id.to_string(),
            })?;
        let mut updated = self.file_set.clone();
        if let Some(file) = updated.file_mut(self.relation) {
            file.content = content;
        }
        self.save_file_set(updated, &file_set_id)?;

        self.services
            .versioning
            .create_for_file(&file_id, &self.user)
            .map_err(ActorError::Versioning)?;
        self.characterize(file_set_id, file_id, None)
    }

    /// Save `updated` and make it the actor's file set. On failure the
    /// actor keeps the file set it had before.
    fn save_file_set(
        &mut self,
        mut updated: LegacyObject,
        file_set_id: &Id,
    ) -> Result<(), ActorError> {
        self.services
            .legacy_store
            .save(&mut updated)
            .map_err(|source| ActorError::SaveFailed {
                file_set_id: file_set_id.to_string(),
                source,
            })?;
        self.file_set = updated;
        Ok(())
    }

    fn characterize(
        &self,
        file_set_id: Id,
        file_id: Id,
        path_hint: Option<std::path::PathBuf>,
    ) -> Result<JobReceipt, ActorError> {
        self.services
            .job_queue
            .perform_later(Job::Characterize {
                file_set_id,
                file_id,
                path_hint,
            })
            .map_err(ActorError::Enqueue)
    }
}

/// Actors are equal when they act on the same file set id, relation, and user.
impl PartialEq for FileActor {
    fn eq(&self, other: &Self) -> bool {
        self.file_set.id() == other.file_set.id()
            && self.relation == other.relation
            && self.user == other.user
    }
}

impl fmt::Debug for FileActor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileActor")
            .field("file_set", &self.file_set.id())
            .field("relation", &self.relation)
            .field("user", &self.user)
            .field("mode", &self.mode)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
