use std::sync::Arc;

use hyrax_config::HyraxConfig;
use hyrax_core::Id;
use hyrax_services::memory::{
    MemoryLegacyStore, MemoryResourceStore, MemoryStorageAdapter, MemoryVersionCommitter,
};
use hyrax_services::{ActorSettings, FileNodeBuilder, VersioningService};
use hyrax_transactions::{Container, StepServices};
use hyrax_wings::{ModelTransformer, PrefixMinter, ResourceClassCache};

/// In-memory adapters and core services shared by every command.
pub struct AppContext {
    pub config: HyraxConfig,
    pub resources: Arc<MemoryResourceStore>,
    pub legacy: Arc<MemoryLegacyStore>,
    pub storage: Arc<MemoryStorageAdapter>,
    pub committer: Arc<MemoryVersionCommitter>,
    pub transformer: ModelTransformer,
    pub container: Container,
}

impl AppContext {
    pub fn new(config: HyraxConfig) -> anyhow::Result<Self> {
        config.minter.validate()?;

        let resources = Arc::new(MemoryResourceStore::new());
        let transformer = ModelTransformer::new(
            Arc::new(ResourceClassCache::new()),
            Arc::new(PrefixMinter::new(config.minter.prefix.as_str())),
            resources.clone(),
        );
        let container = Container::standard(&StepServices {
            query_service: resources.clone(),
            persister: resources.clone(),
            default_admin_set_id: Id::new(config.transactions.default_admin_set_id.as_str()),
        })?;

        tracing::debug!(
            mode = %config.persistence.mode,
            minter_prefix = %config.minter.prefix,
            "application context ready"
        );

        Ok(Self {
            config,
            resources,
            legacy: Arc::new(MemoryLegacyStore::new()),
            storage: Arc::new(MemoryStorageAdapter::new()),
            committer: Arc::new(MemoryVersionCommitter::new()),
            transformer,
            container,
        })
    }

    #[must_use]
    pub fn actor_settings(&self) -> ActorSettings {
        ActorSettings {
            mode: self.config.persistence.mode,
            relation_policy: self.config.persistence.relation_policy,
        }
    }

    #[must_use]
    pub fn node_builder(&self) -> FileNodeBuilder {
        FileNodeBuilder::new(self.storage.clone(), self.resources.clone())
    }

    #[must_use]
    pub fn versioning(&self) -> VersioningService {
        VersioningService::new(self.legacy.clone(), self.committer.clone())
    }
}
