//! # hyrax-core
//!
//! Core types shared by every Hyrax crate.
//!
//! This crate provides:
//! - The canonical [`Id`] type used by the resource persistence layer
//! - Enums for base kinds, behaviors, value types, use relations, and visibility
//! - The legacy object model (`LegacyModel` type descriptors and `LegacyObject` instances)
//! - Data-described resource schemas and schema-parameterized `Resource` records
//! - File entities (`PcdmFile`, `FileNode`, `VersionRecord`) and follow-up [`jobs::Job`]s
//! - Collaborator traits for the persistence back-ends ([`persistence`])
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod inflect;
pub mod jobs;
pub mod legacy;
pub mod persistence;
pub mod resource;
pub mod schema;
pub mod value;

pub use errors::CoreError;
pub use ids::Id;
pub use jobs::{Job, JobReceipt};
pub use legacy::{AccessControls, Accessor, LegacyModel, LegacyModelBuilder, LegacyObject, LegacyRef};
pub use persistence::{
    IdMinter, JobQueue, LegacyStore, PersistError, Persister, QueryService, StorageAdapter,
    StoredFile, VersionCommitter,
};
pub use resource::{AttributeMap, Resource};
pub use schema::{AttributeDef, ResourceSchema, SchemaBuilder};
pub use value::{AttributeValue, LegacyValue};
