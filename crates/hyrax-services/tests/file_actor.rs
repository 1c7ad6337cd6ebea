//! File actor integration tests
//!
//! - Legacy ingest: attach, save, version, characterize; save failure
//! - Resource ingest: node creation, version, characterize; node failure
//! - Revert: restores content, new version, characterize without a path hint
//! - Equality and state tracking

use std::path::PathBuf;
use std::sync::Arc;

use hyrax_core::enums::{Behavior, PersistenceMode, RelationPolicy, UseRelation};
use hyrax_core::{Id, Job, LegacyModel, LegacyObject, LegacyStore, VersionCommitter};
use hyrax_services::memory::{
    MemoryLegacyStore, MemoryResourceStore, MemoryStorageAdapter, MemoryVersionCommitter,
};
use hyrax_services::{
    ActorError, ActorSettings, FileActor, FileActorServices, FileActorState, FileNodeBuilder,
    IngestOutcome, JobIoWrapper, MemoryJobQueue, VersioningService,
};
use pretty_assertions::assert_eq;

struct Fixture {
    legacy: Arc<MemoryLegacyStore>,
    resources: Arc<MemoryResourceStore>,
    storage: Arc<MemoryStorageAdapter>,
    committer: Arc<MemoryVersionCommitter>,
    jobs: Arc<MemoryJobQueue>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            legacy: Arc::new(MemoryLegacyStore::new()),
            resources: Arc::new(MemoryResourceStore::new()),
            storage: Arc::new(MemoryStorageAdapter::new()),
            committer: Arc::new(MemoryVersionCommitter::new()),
            jobs: Arc::new(MemoryJobQueue::new()),
        }
    }

    fn services(&self) -> FileActorServices {
        FileActorServices {
            legacy_store: self.legacy.clone(),
            node_builder: FileNodeBuilder::new(self.storage.clone(), self.resources.clone()),
            versioning: VersioningService::new(self.legacy.clone(), self.committer.clone()),
            job_queue: self.jobs.clone(),
        }
    }

    fn actor(&self, file_set: LegacyObject, mode: PersistenceMode) -> FileActor {
        FileActor::new(
            file_set,
            UseRelation::OriginalFile,
            "depositor@example.com",
            ActorSettings {
                mode,
                relation_policy: RelationPolicy::DefaultToOriginal,
            },
            self.services(),
        )
        .unwrap()
    }
}

fn file_set(id: &str) -> LegacyObject {
    let model = LegacyModel::builder("FileSet")
        .behavior(Behavior::FileSet)
        .build();
    LegacyObject::new(model).with_id(id)
}

fn upload(content: &[u8]) -> JobIoWrapper {
    JobIoWrapper::from_bytes(content.to_vec(), "thesis.pdf", "application/pdf")
        .with_uploaded_file("/uploads/thesis.pdf")
}

// ---------------------------------------------------------------------------
// Legacy path
// ---------------------------------------------------------------------------

#[test]
fn legacy_ingest_saves_versions_and_characterizes() {
    let fx = Fixture::new();
    let mut actor = fx.actor(file_set("fs-1"), PersistenceMode::Legacy);
    assert_eq!(actor.state(), FileActorState::NoFile);

    let outcome = actor.ingest_file(&upload(b"%PDF-1.7")).unwrap();

    let IngestOutcome::Attached { file_id, .. } = &outcome else {
        panic!("legacy ingest should attach to the file set");
    };
    assert_eq!(file_id, &Id::new("fs-1/files/original_file"));
    assert_eq!(actor.state(), FileActorState::Ingested);
    assert_eq!(actor.relation_term(), "original_file");

    let stored = fx.legacy.find("fs-1").unwrap().unwrap();
    assert!(!stored.is_new_record());
    assert_eq!(
        stored.file(UseRelation::OriginalFile).unwrap().content,
        b"%PDF-1.7".to_vec()
    );
    assert_eq!(fx.committer.versions_for(file_id).len(), 1);
    assert_eq!(
        fx.jobs.jobs(),
        vec![Job::Characterize {
            file_set_id: Id::new("fs-1"),
            file_id: file_id.clone(),
            path_hint: Some(PathBuf::from("/uploads/thesis.pdf")),
        }]
    );
}

#[test]
fn legacy_save_failure_enqueues_nothing() {
    let fx = Fixture::new();
    fx.legacy.fail_saves(true);
    let mut actor = fx.actor(file_set("fs-1"), PersistenceMode::Legacy);
    let before = actor.file_set().clone();

    let err = actor.ingest_file(&upload(b"x")).unwrap_err();

    assert!(matches!(err, ActorError::SaveFailed { .. }));
    assert_eq!(actor.state(), FileActorState::Failed);
    assert!(actor.file_set().file(UseRelation::OriginalFile).is_none());
    assert_eq!(actor.file_set(), &before);
    assert!(fx.jobs.is_empty());
    assert!(fx.committer.all().is_empty());
}

#[test]
fn legacy_path_hint_falls_back_to_io_path() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut tmp, b"scan").unwrap();
    let fx = Fixture::new();
    let mut actor = fx.actor(file_set("fs-1"), PersistenceMode::Legacy);

    let io = JobIoWrapper::from_path(tmp.path(), "image/tiff").unwrap();
    actor.ingest_file(&io).unwrap();

    let jobs = fx.jobs.jobs();
    let [Job::Characterize { path_hint, .. }] = jobs.as_slice() else {
        panic!("expected one characterization job");
    };
    assert_eq!(path_hint.as_deref(), Some(tmp.path()));
}

#[test]
fn unsaved_file_set_cannot_ingest() {
    let fx = Fixture::new();
    let model = LegacyModel::builder("FileSet").behavior(Behavior::FileSet).build();
    let mut actor = fx.actor(LegacyObject::new(model), PersistenceMode::Legacy);

    let err = actor.ingest_file(&upload(b"x")).unwrap_err();
    assert!(matches!(err, ActorError::UnsavedFileSet));
}

// ---------------------------------------------------------------------------
// Resource path
// ---------------------------------------------------------------------------

#[test]
fn resource_ingest_stores_node_versions_and_characterizes() {
    let fx = Fixture::new();
    let mut actor = fx.actor(file_set("fs-2"), PersistenceMode::Resource);
    assert_eq!(actor.relation_term(), "http://pcdm.org/use#OriginalFile");

    let outcome = actor.ingest_file(&upload(b"%PDF-1.7")).unwrap();

    let IngestOutcome::Stored { node, receipt } = outcome else {
        panic!("resource ingest should return the saved node");
    };
    let node_id = node.id.clone().unwrap();
    assert_eq!(node.use_relation, UseRelation::OriginalFile);
    assert_eq!(node.file_set_id, Some(Id::new("fs-2")));
    assert_eq!(fx.resources.file_node(&node_id), Some(node.clone()));
    assert_eq!(
        fx.storage.content(&node.file_identifiers[0]),
        Some(b"%PDF-1.7".to_vec())
    );
    assert_eq!(fx.committer.versions_for(&node_id)[0].version_id, "version1");
    assert_eq!(
        receipt.job,
        Job::Characterize {
            file_set_id: Id::new("fs-2"),
            file_id: node_id,
            path_hint: Some(PathBuf::from("/uploads/thesis.pdf")),
        }
    );
}

#[test]
fn node_creation_failure_records_no_version() {
    let fx = Fixture::new();
    fx.storage.fail_uploads(true);
    let mut actor = fx.actor(file_set("fs-2"), PersistenceMode::Resource);

    let err = actor.ingest_file(&upload(b"x")).unwrap_err();

    assert!(matches!(err, ActorError::NodeCreation { .. }));
    assert_eq!(actor.state(), FileActorState::Failed);
    assert_eq!(fx.resources.file_node_count(), 0);
    assert!(fx.committer.all().is_empty());
    assert!(fx.jobs.is_empty());
}

// ---------------------------------------------------------------------------
// Revert
// ---------------------------------------------------------------------------

#[test]
fn revert_restores_an_earlier_version() {
    let fx = Fixture::new();
    let mut actor = fx.actor(file_set("fs-3"), PersistenceMode::Legacy);
    actor.ingest_file(&upload(b"draft")).unwrap();
    actor.ingest_file(&upload(b"final")).unwrap();
    let file_id = Id::new("fs-3/files/original_file");
    assert_eq!(fx.committer.versions_for(&file_id).len(), 2);

    let receipt = actor.revert_to("version1").unwrap();

    assert_eq!(actor.state(), FileActorState::Reverted);
    let stored = fx.legacy.find("fs-3").unwrap().unwrap();
    assert_eq!(
        stored.file(UseRelation::OriginalFile).unwrap().content,
        b"draft".to_vec()
    );
    assert_eq!(fx.committer.versions_for(&file_id).len(), 3);
    assert_eq!(
        receipt.job,
        Job::Characterize {
            file_set_id: Id::new("fs-3"),
            file_id,
            path_hint: None,
        }
    );
}

#[test]
fn revert_without_file_fails() {
    let fx = Fixture::new();
    let mut actor = fx.actor(file_set("fs-4"), PersistenceMode::Legacy);

    let err = actor.revert_to("version1").unwrap_err();
    assert!(matches!(err, ActorError::NoRelatedFile { .. }));
    assert_eq!(actor.state(), FileActorState::Failed);
}

#[test]
fn revert_save_failure_enqueues_nothing() {
    let fx = Fixture::new();
    let mut actor = fx.actor(file_set("fs-5"), PersistenceMode::Legacy);
    actor.ingest_file(&upload(b"draft")).unwrap();
    actor.ingest_file(&upload(b"final")).unwrap();
    fx.legacy.fail_saves(true);
    let before = actor.file_set().clone();

    let err = actor.revert_to("version1").unwrap_err();

    assert!(matches!(err, ActorError::SaveFailed { .. }));
    assert_eq!(actor.file_set(), &before);
    assert_eq!(
        actor.file_set().file(UseRelation::OriginalFile).unwrap().content,
        b"final".to_vec()
    );
    assert_eq!(fx.jobs.len(), 2);
}

#[test]
fn unknown_revision_is_reported() {
    let fx = Fixture::new();
    let mut actor = fx.actor(file_set("fs-6"), PersistenceMode::Legacy);
    actor.ingest_file(&upload(b"draft")).unwrap();

    let err = actor.revert_to("version7").unwrap_err();
    assert!(matches!(err, ActorError::UnknownRevision { revision, .. } if revision == "version7"));
}

// ---------------------------------------------------------------------------
// Construction and equality
// ---------------------------------------------------------------------------

#[test]
fn actors_compare_by_file_set_relation_and_user() {
    let fx = Fixture::new();
    let mut same_id = file_set("fs-7");
    same_id.set_ordered_member_ids(vec![Id::new("ignored")]);

    let a = fx.actor(file_set("fs-7"), PersistenceMode::Legacy);
    let b = fx.actor(same_id, PersistenceMode::Resource);
    let c = fx.actor(file_set("fs-8"), PersistenceMode::Legacy);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn strict_policy_rejects_unknown_relation_at_construction() {
    let fx = Fixture::new();
    let result = FileActor::new(
        file_set("fs-9"),
        "preservation_master",
        "depositor@example.com",
        ActorSettings {
            mode: PersistenceMode::Resource,
            relation_policy: RelationPolicy::Strict,
        },
        fx.services(),
    );
    assert!(matches!(result, Err(ActorError::UnknownRelation(_))));
}

#[test]
fn uri_relation_is_accepted_in_legacy_mode() {
    let fx = Fixture::new();
    let actor = FileActor::new(
        file_set("fs-10"),
        "http://pcdm.org/use#ExtractedText",
        "depositor@example.com",
        ActorSettings {
            mode: PersistenceMode::Legacy,
            relation_policy: RelationPolicy::Strict,
        },
        fx.services(),
    )
    .unwrap();
    assert_eq!(actor.relation(), UseRelation::ExtractedFile);
    assert_eq!(actor.relation_term(), "extracted_file");
}
