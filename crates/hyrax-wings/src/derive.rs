//! Derive a [`ResourceSchema`] from a legacy type descriptor.
//!
//! Derivation is pure: the same [`LegacyModel`] always yields an equal
//! schema, which is what lets [`crate::ResourceClassCache`] memoize it.

use hyrax_core::enums::{BaseKind, Behavior, ValueType};
use hyrax_core::legacy::relationship_key;
use hyrax_core::{LegacyModel, ResourceSchema, SchemaBuilder};

/// Relationship keys that never become set-of-id attributes on a derived
/// schema. Members are ordered and handled as `member_ids`; collection
/// membership is predeclared by the work and collection behaviors.
const EXCLUDED_RELATIONSHIP_KEYS: [&str; 2] = ["member_ids", "member_of_collection_ids"];

/// Behavior precedence when a type includes more than one.
const BEHAVIOR_PRECEDENCE: [Behavior; 3] = [Behavior::Collection, Behavior::Work, Behavior::FileSet];

/// Base kind a legacy type's schema is tagged with.
#[must_use]
pub fn base_kind_for(model: &LegacyModel) -> BaseKind {
    if model.is_embargo() {
        return BaseKind::Embargo;
    }
    if model.is_lease() {
        return BaseKind::Lease;
    }
    BEHAVIOR_PRECEDENCE
        .into_iter()
        .find(|b| model.has_behavior(*b))
        .map_or(BaseKind::Resource, Behavior::base_kind)
}

/// Build the resource schema mirroring `model`.
#[must_use]
pub fn derive_schema(model: &LegacyModel) -> ResourceSchema {
    let base = base_kind_for(model);
    let mut builder = predeclared(ResourceSchema::builder(model.name(), base), model, base);

    for property in model.properties() {
        builder = builder.attribute(property.as_str(), ValueType::String);
    }

    for reflection in model.reflections().unwrap_or_default() {
        if let Some(key) = relationship_key(reflection) {
            if !EXCLUDED_RELATIONSHIP_KEYS.contains(&key.as_str()) {
                builder = builder.attribute(key, ValueType::IdSet);
            }
        }
    }

    for foreign_key in model.foreign_keys() {
        builder = builder.attribute(foreign_key, ValueType::Id);
    }

    let schema = builder.build();
    tracing::debug!(
        internal_resource = schema.internal_resource(),
        base = %schema.base(),
        attributes = schema.attributes().len(),
        "derived resource schema"
    );
    schema
}

// ---------------------------------------------------------------------------
// Predeclared attributes
// ---------------------------------------------------------------------------

fn predeclared(builder: SchemaBuilder, model: &LegacyModel, base: BaseKind) -> SchemaBuilder {
    let mut builder = builder
        .attribute("created_at", ValueType::DateTime)
        .attribute("updated_at", ValueType::DateTime)
        .attribute("read_users", ValueType::StringList)
        .attribute("read_groups", ValueType::StringList)
        .attribute("edit_users", ValueType::StringList)
        .attribute("edit_groups", ValueType::StringList)
        .attribute("member_ids", ValueType::IdList)
        .attribute("embargo", ValueType::Resource)
        .attribute("lease", ValueType::Resource)
        .attribute("visibility", ValueType::String);

    builder = match base {
        BaseKind::Embargo => builder
            .attribute("embargo_release_date", ValueType::DateTime)
            .attribute("visibility_during_embargo", ValueType::String)
            .attribute("visibility_after_embargo", ValueType::String)
            .attribute("embargo_history", ValueType::StringList),
        BaseKind::Lease => builder
            .attribute("lease_expiration_date", ValueType::DateTime)
            .attribute("visibility_during_lease", ValueType::String)
            .attribute("visibility_after_lease", ValueType::String)
            .attribute("lease_history", ValueType::StringList),
        _ => builder,
    };

    for behavior in model.behaviors() {
        builder = behavior_attributes(builder, *behavior);
    }
    builder
}

fn behavior_attributes(builder: SchemaBuilder, behavior: Behavior) -> SchemaBuilder {
    match behavior {
        Behavior::Work => builder
            .attribute("admin_set_id", ValueType::Id)
            .attribute("member_of_collection_ids", ValueType::IdSet)
            .attribute("depositor", ValueType::String)
            .attribute("date_uploaded", ValueType::DateTime)
            .attribute("date_modified", ValueType::DateTime),
        Behavior::Collection => builder
            .attribute("member_of_collection_ids", ValueType::IdSet)
            .attribute("collection_type_gid", ValueType::String),
        Behavior::FileSet => builder
            .attribute("file_ids", ValueType::IdSet)
            .attribute("original_file_id", ValueType::Id)
            .attribute("thumbnail_id", ValueType::Id)
            .attribute("extracted_text_id", ValueType::Id),
    }
}

#[cfg(test)]
mod tests {
    use hyrax_core::legacy::{EMBARGO_MODEL, LEASE_MODEL};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn book() -> std::sync::Arc<LegacyModel> {
        LegacyModel::builder("Book")
            .properties(["title", "creator"])
            .reflection("members")
            .reflection("member_of_collections")
            .reflection("chapters")
            .reflection("admin_set_id")
            .reflection("representative_id")
            .behavior(Behavior::Work)
            .build()
    }

    #[test]
    fn properties_and_reflections_become_typed_attributes() {
        let schema = derive_schema(&book());

        assert_eq!(schema.internal_resource(), "Book");
        assert_eq!(schema.base(), BaseKind::Work);
        assert_eq!(schema.attribute_type("title"), Some(ValueType::String));
        assert_eq!(schema.attribute_type("creator"), Some(ValueType::String));
        assert_eq!(schema.attribute_type("chapter_ids"), Some(ValueType::IdSet));
        assert_eq!(schema.attribute_type("representative_id"), Some(ValueType::Id));
        assert_eq!(schema.attribute_type("admin_set_id"), Some(ValueType::Id));
    }

    #[test]
    fn ordered_members_stay_an_id_list() {
        let schema = derive_schema(&book());
        assert_eq!(schema.attribute_type("member_ids"), Some(ValueType::IdList));
        assert_eq!(
            schema.attribute_type("member_of_collection_ids"),
            Some(ValueType::IdSet)
        );
    }

    #[test]
    fn type_without_reflections_has_only_predeclared_and_properties() {
        let model = LegacyModel::builder("Note").property("body").build();
        let schema = derive_schema(&model);

        assert_eq!(schema.base(), BaseKind::Resource);
        assert!(!schema.attribute_names().any(|name| name.ends_with("_ids") && name != "member_ids"));
        assert!(schema.has_attribute("body"));
        assert!(schema.has_attribute("visibility"));
    }

    #[test]
    fn property_redefining_predeclared_attribute_keeps_position() {
        let model = LegacyModel::builder("Thesis")
            .property("date_uploaded")
            .behavior(Behavior::Work)
            .build();
        let schema = derive_schema(&model);

        assert_eq!(schema.attribute_type("date_uploaded"), Some(ValueType::String));
        let position = schema.attribute_names().position(|n| n == "date_uploaded");
        let depositor = schema.attribute_names().position(|n| n == "depositor");
        assert!(position > depositor);
        assert_eq!(schema.attribute_names().filter(|n| *n == "date_uploaded").count(), 1);
    }

    #[rstest]
    #[case::embargo(LegacyModel::builder(EMBARGO_MODEL).build(), BaseKind::Embargo)]
    #[case::lease(LegacyModel::builder(LEASE_MODEL).build(), BaseKind::Lease)]
    #[case::plain(LegacyModel::builder("Note").build(), BaseKind::Resource)]
    #[case::file_set(LegacyModel::builder("FileSet").behavior(Behavior::FileSet).build(), BaseKind::FileSet)]
    #[case::collection_wins(
        LegacyModel::builder("Odd").behavior(Behavior::Work).behavior(Behavior::Collection).build(),
        BaseKind::Collection
    )]
    #[case::work_beats_file_set(
        LegacyModel::builder("Odd").behavior(Behavior::FileSet).behavior(Behavior::Work).build(),
        BaseKind::Work
    )]
    fn base_kind_selection(#[case] model: std::sync::Arc<LegacyModel>, #[case] expected: BaseKind) {
        assert_eq!(base_kind_for(&model), expected);
    }

    #[test]
    fn embargo_schema_has_embargo_attributes() {
        let schema = derive_schema(&LegacyModel::builder(EMBARGO_MODEL).build());
        assert_eq!(
            schema.attribute_type("embargo_release_date"),
            Some(ValueType::DateTime)
        );
        assert_eq!(
            schema.attribute_type("embargo_history"),
            Some(ValueType::StringList)
        );
        assert!(!schema.has_attribute("lease_history"));
    }

    #[test]
    fn derivation_is_pure() {
        let model = book();
        assert_eq!(derive_schema(&model), derive_schema(&model));
    }
}
