//! Persistence routing configuration.

use hyrax_core::enums::{PersistenceMode, RelationPolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PersistenceConfig {
    /// Back-end that file ingestion is routed through.
    #[serde(default)]
    pub mode: PersistenceMode,

    /// Handling of use-relation values outside the PCDM use vocabulary.
    #[serde(default)]
    pub relation_policy: RelationPolicy,
}

impl PersistenceConfig {
    #[must_use]
    pub fn uses_resource_store(&self) -> bool {
        self.mode == PersistenceMode::Resource
    }
}
