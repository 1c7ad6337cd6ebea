//! Build resources from legacy objects.
//!
//! [`ModelTransformer::build`] resolves the object's schema through the
//! shared [`ResourceClassCache`], assigns an id (minting one if the object has
//! never had one), then assembles the attribute map:
//!
//! 1. declared properties and plural relationships, via [`AttributeTransformer`]
//! 2. singular foreign keys
//! 3. derived attributes: timestamps, access lists, ordered members, visibility
//! 4. embargo and lease, resolved through the query service
//!
//! The resulting [`Resource`] has every value coerced to its declared type.

use std::sync::Arc;

use hyrax_core::{
    AccessControls, AttributeMap, AttributeValue, Id, IdMinter, LegacyModel, LegacyObject,
    LegacyRef, QueryService, Resource,
};

use crate::attribute_transformer::AttributeTransformer;
use crate::cache::ResourceClassCache;
use crate::derive::derive_schema;
use crate::error::TransformError;
use crate::value_mapper::TransformerValueMapper;

pub struct ModelTransformer {
    cache: Arc<ResourceClassCache>,
    minter: Arc<dyn IdMinter>,
    query_service: Arc<dyn QueryService>,
}

impl ModelTransformer {
    #[must_use]
    pub fn new(
        cache: Arc<ResourceClassCache>,
        minter: Arc<dyn IdMinter>,
        query_service: Arc<dyn QueryService>,
    ) -> Self {
        Self {
            cache,
            minter,
            query_service,
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &Arc<ResourceClassCache> {
        &self.cache
    }

    /// One-shot convenience: build `object` with the given collaborators.
    ///
    /// # Errors
    ///
    /// See [`Self::build`].
    pub fn for_object(
        object: &mut LegacyObject,
        cache: Arc<ResourceClassCache>,
        minter: Arc<dyn IdMinter>,
        query_service: Arc<dyn QueryService>,
    ) -> Result<Resource, TransformError> {
        Self::new(cache, minter, query_service).build(object)
    }

    /// Transform `object` into a resource.
    ///
    /// An object without an id has one minted and assigned to it, so a second
    /// build of the same object yields the same id.
    ///
    /// # Errors
    ///
    /// Returns `TransformError` if minting or a lookup fails, or if a value
    /// cannot be coerced to its declared type.
    pub fn build(&self, object: &mut LegacyObject) -> Result<Resource, TransformError> {
        let model = Arc::clone(object.model());
        let schema = self.cache.fetch(&model, || derive_schema(&model));

        let id = match object.id() {
            Some(id) => Id::new(id),
            None => {
                let minted = self.minter.mint()?;
                tracing::debug!(model = model.name(), id = %minted, "minted id for legacy object");
                object.set_id(minted.as_str());
                Id::new(minted)
            }
        };

        let attributes = self.attributes(object, &model)?;
        Ok(Resource::new(
            schema,
            id,
            object.is_new_record(),
            attributes,
        )?)
    }

    fn attributes(
        &self,
        object: &mut LegacyObject,
        model: &LegacyModel,
    ) -> Result<AttributeMap, TransformError> {
        let mut keys: Vec<String> = model.properties().to_vec();
        keys.extend(model.relationship_keys());

        let mut attributes = AttributeTransformer::new(TransformerValueMapper::new(self))
            .run(object, &keys)?;

        for foreign_key in model.foreign_keys() {
            let value = object.foreign_key(&foreign_key).cloned().into();
            attributes.insert(foreign_key, value);
        }

        attributes.extend(derived_attributes(object));
        self.append_reference(&mut attributes, "embargo", object.embargo())?;
        self.append_reference(&mut attributes, "lease", object.lease())?;
        Ok(attributes)
    }

    fn append_reference(
        &self,
        attributes: &mut AttributeMap,
        name: &str,
        reference: Option<&LegacyRef>,
    ) -> Result<(), TransformError> {
        let Some(id) = reference.and_then(LegacyRef::id) else {
            return Ok(());
        };
        match self.query_service.find_by(&id)? {
            Some(resource) => {
                attributes.insert(name.to_string(), resource.into());
            }
            None => tracing::warn!(%id, attribute = name, "referenced resource not found; omitting"),
        }
        Ok(())
    }
}

fn derived_attributes(object: &LegacyObject) -> AttributeMap {
    let AccessControls {
        read_users,
        read_groups,
        edit_users,
        edit_groups,
    } = object.access();

    let mut attributes = AttributeMap::new();
    attributes.insert("created_at".into(), object.create_date().into());
    attributes.insert("updated_at".into(), object.modified_date().into());
    attributes.insert("read_users".into(), AttributeValue::texts(read_users));
    attributes.insert("read_groups".into(), AttributeValue::texts(read_groups));
    attributes.insert("edit_users".into(), AttributeValue::texts(edit_users));
    attributes.insert("edit_groups".into(), AttributeValue::texts(edit_groups));
    attributes.insert(
        "member_ids".into(),
        AttributeValue::ids(object.ordered_member_ids().iter().cloned()),
    );
    attributes.insert(
        "visibility".into(),
        object.visibility().map(|v| v.as_str().to_string()).into(),
    );
    attributes
}
