//! Convert resources back into legacy objects.

use std::sync::Arc;

use hyrax_core::legacy::relationship_key;
use hyrax_core::{AttributeValue, Id, LegacyObject, LegacyRef, LegacyValue, Resource};

use crate::error::TransformError;
use crate::registry::ModelRegistry;

/// Reverse of [`crate::ModelTransformer`]: rebuilds a legacy object of the
/// registered type named by the resource's internal resource name.
pub struct LegacyConverter {
    registry: Arc<ModelRegistry>,
}

impl LegacyConverter {
    #[must_use]
    pub const fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// # Errors
    ///
    /// Returns `TransformError::UnknownModel` if the resource's type (or a
    /// nested resource's type) is not registered.
    pub fn convert(&self, resource: &Resource) -> Result<LegacyObject, TransformError> {
        let model = self
            .registry
            .get(resource.internal_resource())
            .ok_or_else(|| TransformError::UnknownModel(resource.internal_resource().to_string()))?;

        let mut object = LegacyObject::new(Arc::clone(model)).with_id(resource.id().as_str());
        if !resource.is_new_record() {
            object.mark_persisted();
        }

        for property in model.properties() {
            if let Some(value) = resource.get(property) {
                object.set_property(property, self.to_legacy(value)?)?;
            }
        }

        for reflection in model.reflections().unwrap_or_default() {
            if reflection.ends_with("_id") {
                object.set_foreign_key(reflection, resource.id_attribute(reflection))?;
            } else if let Some(key) = relationship_key(reflection) {
                object.set_relationship(reflection, resource.ids(&key))?;
            }
        }

        object.set_ordered_member_ids(resource.member_ids());
        let access = object.access_mut();
        access.read_users = texts(resource.get("read_users"));
        access.read_groups = texts(resource.get("read_groups"));
        access.edit_users = texts(resource.get("edit_users"));
        access.edit_groups = texts(resource.get("edit_groups"));
        object.set_create_date(date(resource.get("created_at")));
        object.set_modified_date(date(resource.get("updated_at")));
        object.set_visibility(resource.visibility());
        object.set_embargo(self.reference(resource.nested("embargo"))?);
        object.set_lease(self.reference(resource.nested("lease"))?);

        Ok(object)
    }

    fn to_legacy(&self, value: &AttributeValue) -> Result<LegacyValue, TransformError> {
        Ok(match value {
            AttributeValue::Null => LegacyValue::Null,
            AttributeValue::Bool(b) => LegacyValue::Bool(*b),
            AttributeValue::Int(i) => LegacyValue::Int(*i),
            AttributeValue::Text(s) => LegacyValue::Text(s.clone()),
            AttributeValue::Date(d) => LegacyValue::Date(*d),
            AttributeValue::Id(id) => LegacyValue::Id(id.clone()),
            AttributeValue::List(items) => LegacyValue::List(
                items
                    .iter()
                    .map(|item| self.to_legacy(item))
                    .collect::<Result<_, _>>()?,
            ),
            AttributeValue::Resource(nested) => LegacyValue::Object(Box::new(self.convert(nested)?)),
        })
    }

    /// Embedded when the nested type is registered, otherwise by id.
    fn reference(&self, nested: Option<&Resource>) -> Result<Option<LegacyRef>, TransformError> {
        let Some(nested) = nested else {
            return Ok(None);
        };
        if self.registry.get(nested.internal_resource()).is_none() {
            return Ok(Some(LegacyRef::Id(Id::clone(nested.id()))));
        }
        Ok(Some(LegacyRef::Embedded(Box::new(self.convert(nested)?))))
    }
}

fn texts(value: Option<&AttributeValue>) -> Vec<String> {
    match value {
        Some(AttributeValue::List(items)) => items
            .iter()
            .filter_map(AttributeValue::as_text)
            .map(str::to_string)
            .collect(),
        Some(other) => other.as_text().map(str::to_string).into_iter().collect(),
        None => Vec::new(),
    }
}

fn date(value: Option<&AttributeValue>) -> Option<chrono::DateTime<chrono::Utc>> {
    match value {
        Some(AttributeValue::Date(d)) => Some(*d),
        _ => None,
    }
}
