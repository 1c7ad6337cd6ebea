//! Push a parent's visibility down to its members.
//!
//! [`VisibilityPropagator::for_source`] picks a propagator from an explicit
//! source tag. Legacy works and resources are supported; any other source
//! (e.g. a legacy collection) yields `None` and the caller does nothing.

use std::sync::Arc;

use hyrax_core::enums::Behavior;
use hyrax_core::{
    AttributeValue, LegacyObject, LegacyStore, Persister, QueryService, Resource,
};

use crate::error::PropagationError;

/// The object visibility is propagated from.
#[derive(Debug, Clone)]
pub enum VisibilitySource {
    Legacy(LegacyObject),
    Resource(Resource),
}

/// Stores the propagators read members from and write them back to.
#[derive(Clone)]
pub struct PropagationServices {
    pub legacy_store: Arc<dyn LegacyStore>,
    pub query_service: Arc<dyn QueryService>,
    pub persister: Arc<dyn Persister>,
}

pub enum VisibilityPropagator {
    Legacy(LegacyVisibilityPropagator),
    Resource(ResourceVisibilityPropagator),
}

impl VisibilityPropagator {
    #[must_use]
    pub fn for_source(source: VisibilitySource, services: &PropagationServices) -> Option<Self> {
        match source {
            VisibilitySource::Legacy(object) if object.model().has_behavior(Behavior::Work) => {
                Some(Self::Legacy(LegacyVisibilityPropagator {
                    source: object,
                    legacy_store: Arc::clone(&services.legacy_store),
                }))
            }
            VisibilitySource::Legacy(object) => {
                tracing::debug!(model = object.model().name(), "no visibility propagator for source");
                None
            }
            VisibilitySource::Resource(resource) => {
                Some(Self::Resource(ResourceVisibilityPropagator {
                    source: resource,
                    query_service: Arc::clone(&services.query_service),
                    persister: Arc::clone(&services.persister),
                }))
            }
        }
    }

    /// Apply the source's visibility to every member; returns how many
    /// members were updated.
    ///
    /// # Errors
    ///
    /// Returns `PropagationError` if a member lookup or save fails.
    pub fn propagate(&self) -> Result<usize, PropagationError> {
        match self {
            Self::Legacy(propagator) => propagator.propagate(),
            Self::Resource(propagator) => propagator.propagate(),
        }
    }
}

/// Legacy works → their file sets.
pub struct LegacyVisibilityPropagator {
    source: LegacyObject,
    legacy_store: Arc<dyn LegacyStore>,
}

impl LegacyVisibilityPropagator {
    fn propagate(&self) -> Result<usize, PropagationError> {
        let mut updated = 0;
        for member_id in self.source.ordered_member_ids() {
            let Some(mut member) = self.legacy_store.find(member_id.as_str())? else {
                tracing::warn!(member = %member_id, source = ?self.source.id(), "member not found; skipping");
                continue;
            };
            member.set_visibility(self.source.visibility());
            if let Some(embargo) = self.source.embargo() {
                member.set_embargo(Some(embargo.clone()));
            }
            if let Some(lease) = self.source.lease() {
                member.set_lease(Some(lease.clone()));
            }
            self.legacy_store
                .save(&mut member)
                .map_err(|source| PropagationError::SaveFailed {
                    member_id: member_id.to_string(),
                    source,
                })?;
            updated += 1;
        }
        Ok(updated)
    }
}

pub struct ResourceVisibilityPropagator {
    source: Resource,
    query_service: Arc<dyn QueryService>,
    persister: Arc<dyn Persister>,
}

impl ResourceVisibilityPropagator {
    fn propagate(&self) -> Result<usize, PropagationError> {
        let visibility: AttributeValue = self
            .source
            .visibility()
            .map(|v| v.as_str().to_string())
            .into();

        let mut updated = 0;
        for member_id in self.source.member_ids() {
            let Some(member) = self.query_service.find_by(&member_id)? else {
                tracing::warn!(member = %member_id, source = %self.source.id(), "member not found; skipping");
                continue;
            };
            let mut member = member.with_attribute("visibility", visibility.clone())?;
            for name in ["embargo", "lease"] {
                if let Some(nested) = self.source.nested(name) {
                    member = member.with_attribute(name, nested.clone())?;
                }
            }
            self.persister
                .save(&member)
                .map_err(|source| PropagationError::SaveFailed {
                    member_id: member_id.to_string(),
                    source,
                })?;
            updated += 1;
        }
        Ok(updated)
    }
}
