//! Read a set of named attributes off a legacy object.

use hyrax_core::{Accessor, AttributeMap, LegacyObject, LegacyValue};

use crate::error::TransformError;
use crate::value_mapper::TransformerValueMapper;

pub struct AttributeTransformer<'a> {
    mapper: TransformerValueMapper<'a>,
}

impl<'a> AttributeTransformer<'a> {
    #[must_use]
    pub const fn new(mapper: TransformerValueMapper<'a>) -> Self {
        Self { mapper }
    }

    /// Map every requested attribute the object supports.
    ///
    /// Names the object's type does not support are left out of the result;
    /// an absent key means "no data", which is not the same as `Null`.
    ///
    /// # Errors
    ///
    /// Returns `TransformError` if a nested object cannot be built.
    pub fn run<S: AsRef<str>>(
        &self,
        object: &mut LegacyObject,
        keys: &[S],
    ) -> Result<AttributeMap, TransformError> {
        let mut attributes = AttributeMap::new();
        for key in keys {
            let key = key.as_ref();
            let Some(accessor) = object.model().accessor(key).cloned() else {
                continue;
            };
            let value = match accessor {
                // Properties are mapped in place so nested objects keep any id
                // minted for them.
                Accessor::Property => match object.property_mut(key) {
                    Some(slot) => self.mapper.map(slot)?,
                    None => continue,
                },
                Accessor::Relationship { .. } | Accessor::ForeignKey => {
                    let mut value = object.read(key).unwrap_or(LegacyValue::Null);
                    self.mapper.map(&mut value)?
                }
            };
            attributes.insert(key.to_string(), value);
        }
        Ok(attributes)
    }
}

#[cfg(test)]
mod tests {
    use hyrax_core::enums::Behavior;
    use hyrax_core::{AttributeValue, Id, LegacyModel};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::transformer;

    #[test]
    fn unsupported_keys_are_omitted() {
        let model = LegacyModel::builder("Article").properties(["a", "b"]).build();
        let mut object = LegacyObject::new(model).with_id("art-1");
        object.set_property("a", LegacyValue::text("alpha")).unwrap();

        let transformer = transformer();
        let attributes = AttributeTransformer::new(TransformerValueMapper::new(&transformer))
            .run(&mut object, &["a", "b", "c"])
            .unwrap();

        let keys: Vec<_> = attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(attributes["a"], AttributeValue::Text("alpha".into()));
        assert_eq!(attributes["b"], AttributeValue::Null);
    }

    #[test]
    fn relationships_map_to_id_lists() {
        let model = LegacyModel::builder("Article")
            .reflection("member_of_collections")
            .behavior(Behavior::Work)
            .build();
        let mut object = LegacyObject::new(model).with_id("art-1");
        object
            .set_relationship("member_of_collections", vec![Id::new("c1"), Id::new("c2")])
            .unwrap();

        let transformer = transformer();
        let attributes = AttributeTransformer::new(TransformerValueMapper::new(&transformer))
            .run(&mut object, &["member_of_collection_ids"])
            .unwrap();

        assert_eq!(
            attributes["member_of_collection_ids"],
            AttributeValue::ids([Id::new("c1"), Id::new("c2")])
        );
    }

    #[test]
    fn nested_objects_become_resources_with_minted_ids() {
        let agent = LegacyModel::builder("Agent").property("name").build();
        let model = LegacyModel::builder("Article").property("contributor").build();

        let mut nested = LegacyObject::new(agent);
        nested.set_property("name", LegacyValue::text("Ada")).unwrap();
        let mut object = LegacyObject::new(model).with_id("art-1");
        object
            .set_property("contributor", LegacyValue::Object(Box::new(nested)))
            .unwrap();

        let transformer = transformer();
        let attributes = AttributeTransformer::new(TransformerValueMapper::new(&transformer))
            .run(&mut object, &["contributor"])
            .unwrap();

        let AttributeValue::Resource(resource) = &attributes["contributor"] else {
            panic!("expected nested resource");
        };
        assert_eq!(resource.internal_resource(), "Agent");
        assert_eq!(resource.get("name"), Some(&AttributeValue::Text("Ada".into())));

        let Some(LegacyValue::Object(stored)) = object.property("contributor") else {
            panic!("expected nested legacy object");
        };
        assert_eq!(stored.id(), Some(resource.id().as_str()));
    }
}
