//! # hyrax-services
//!
//! Services operating on resources and legacy objects:
//!
//! - [`ResourceFinder`] / [`ActiveFedoraFinder`]: id lookup on either side
//! - [`FileActor`]: file ingest and revert routed by persistence mode
//! - [`VisibilityPropagator`]: visibility from a parent to its members
//! - [`VersioningService`], [`FileNodeBuilder`], and job queues
//! - [`memory`]: in-memory adapters for every collaborator trait

pub mod error;
pub mod file_actor;
pub mod file_node_builder;
pub mod finder;
pub mod io;
pub mod jobs;
pub mod memory;
pub mod versioning;
pub mod visibility;

pub use error::{ActorError, PropagationError};
pub use file_actor::{
    ActorSettings, FileActor, FileActorServices, FileActorState, IngestOutcome, RelationInput,
    relation_term,
};
pub use file_node_builder::FileNodeBuilder;
pub use finder::{ActiveFedoraFinder, ResourceFinder};
pub use io::JobIoWrapper;
pub use jobs::{ChannelJobQueue, MemoryJobQueue};
pub use versioning::VersioningService;
pub use visibility::{
    LegacyVisibilityPropagator, PropagationServices, ResourceVisibilityPropagator,
    VisibilityPropagator, VisibilitySource,
};
