//! The legacy (triple-store-backed) object model.
//!
//! A [`LegacyModel`] describes a legacy type: its declared properties, its
//! reflections (relationships), and the behaviors it includes. The set of
//! attribute names a type "responds to" is computed once, when the model is
//! built, and shared by every [`LegacyObject`] of that type.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::entities::PcdmFile;
use crate::enums::{Behavior, UseRelation, Visibility};
use crate::errors::CoreError;
use crate::ids::Id;
use crate::inflect::singularize;
use crate::value::LegacyValue;

/// Fully-qualified name of the legacy embargo type.
pub const EMBARGO_MODEL: &str = "Hydra::AccessControls::Embargo";

/// Fully-qualified name of the legacy lease type.
pub const LEASE_MODEL: &str = "Hydra::AccessControls::Lease";

/// How a supported attribute name is read from a legacy object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// A declared property, read by name.
    Property,
    /// The `*_ids` reader of a plural reflection.
    Relationship { reflection: String },
    /// A singular foreign key (reflection name ends in `_id`).
    ForeignKey,
}

/// Name of the `*_ids` reader for a plural reflection, or `None` when the
/// reflection name already mentions an id.
#[must_use]
pub fn relationship_key(reflection: &str) -> Option<String> {
    if reflection.contains("id") {
        None
    } else {
        Some(format!("{}_ids", singularize(reflection)))
    }
}

/// Type descriptor for a legacy class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyModel {
    name: String,
    properties: Vec<String>,
    reflections: Option<Vec<String>>,
    behaviors: BTreeSet<Behavior>,
    accessors: BTreeMap<String, Accessor>,
}

impl LegacyModel {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LegacyModelBuilder {
        LegacyModelBuilder {
            name: name.into(),
            properties: Vec::new(),
            reflections: None,
            behaviors: BTreeSet::new(),
        }
    }

    /// Fully-qualified type name; also the identity the schema cache keys on.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Reflection names, or `None` if the type has no reflection support.
    #[must_use]
    pub fn reflections(&self) -> Option<&[String]> {
        self.reflections.as_deref()
    }

    #[must_use]
    pub const fn behaviors(&self) -> &BTreeSet<Behavior> {
        &self.behaviors
    }

    #[must_use]
    pub fn has_behavior(&self, behavior: Behavior) -> bool {
        self.behaviors.contains(&behavior)
    }

    #[must_use]
    pub fn is_embargo(&self) -> bool {
        self.name == EMBARGO_MODEL
    }

    #[must_use]
    pub fn is_lease(&self) -> bool {
        self.name == LEASE_MODEL
    }

    /// Whether objects of this type support reading `attribute`.
    #[must_use]
    pub fn responds_to(&self, attribute: &str) -> bool {
        self.accessors.contains_key(attribute)
    }

    #[must_use]
    pub fn accessor(&self, attribute: &str) -> Option<&Accessor> {
        self.accessors.get(attribute)
    }

    /// Plural reflections mapped to their `*_ids` reader names, in declaration order.
    #[must_use]
    pub fn relationship_keys(&self) -> Vec<String> {
        self.reflections()
            .unwrap_or_default()
            .iter()
            .filter_map(|r| relationship_key(r))
            .filter(|key| key != "member_ids")
            .collect()
    }

    /// Reflections that are singular foreign keys.
    #[must_use]
    pub fn foreign_keys(&self) -> Vec<String> {
        self.reflections()
            .unwrap_or_default()
            .iter()
            .filter(|r| r.ends_with("_id"))
            .cloned()
            .collect()
    }
}

pub struct LegacyModelBuilder {
    name: String,
    properties: Vec<String>,
    reflections: Option<Vec<String>>,
    behaviors: BTreeSet<Behavior>,
}

impl LegacyModelBuilder {
    #[must_use]
    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.properties.push(name.into());
        self
    }

    #[must_use]
    pub fn properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare a reflection. The first call enables reflection support.
    #[must_use]
    pub fn reflection(mut self, name: impl Into<String>) -> Self {
        self.reflections.get_or_insert_with(Vec::new).push(name.into());
        self
    }

    /// Enable reflection support without declaring any reflection.
    #[must_use]
    pub fn with_reflections(mut self) -> Self {
        self.reflections.get_or_insert_with(Vec::new);
        self
    }

    #[must_use]
    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.insert(behavior);
        self
    }

    #[must_use]
    pub fn build(self) -> Arc<LegacyModel> {
        let mut accessors = BTreeMap::new();
        for property in &self.properties {
            accessors.insert(property.clone(), Accessor::Property);
        }
        for reflection in self.reflections.iter().flatten() {
            if reflection.ends_with("_id") {
                accessors.insert(reflection.clone(), Accessor::ForeignKey);
            } else if let Some(key) = relationship_key(reflection) {
                accessors.insert(
                    key,
                    Accessor::Relationship {
                        reflection: reflection.clone(),
                    },
                );
            }
        }

        Arc::new(LegacyModel {
            name: self.name,
            properties: self.properties,
            reflections: self.reflections,
            behaviors: self.behaviors,
            accessors,
        })
    }
}

/// Read/edit access lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessControls {
    pub read_users: Vec<String>,
    pub read_groups: Vec<String>,
    pub edit_users: Vec<String>,
    pub edit_groups: Vec<String>,
}

/// Reference to an embargo or lease: by id or as an embedded object.
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyRef {
    Id(Id),
    Embedded(Box<LegacyObject>),
}

impl LegacyRef {
    #[must_use]
    pub fn id(&self) -> Option<Id> {
        match self {
            Self::Id(id) => Some(id.clone()),
            Self::Embedded(object) => object.id().map(Id::new),
        }
    }
}

/// An instance of a legacy type.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyObject {
    model: Arc<LegacyModel>,
    id: Option<String>,
    new_record: bool,
    properties: BTreeMap<String, LegacyValue>,
    relationships: BTreeMap<String, Vec<Id>>,
    foreign_keys: BTreeMap<String, Id>,
    ordered_member_ids: Vec<Id>,
    access: AccessControls,
    create_date: Option<DateTime<Utc>>,
    modified_date: Option<DateTime<Utc>>,
    visibility: Option<Visibility>,
    embargo: Option<LegacyRef>,
    lease: Option<LegacyRef>,
    files: BTreeMap<UseRelation, PcdmFile>,
}

impl LegacyObject {
    /// A new, unpersisted object with no id.
    #[must_use]
    pub fn new(model: Arc<LegacyModel>) -> Self {
        Self {
            model,
            id: None,
            new_record: true,
            properties: BTreeMap::new(),
            relationships: BTreeMap::new(),
            foreign_keys: BTreeMap::new(),
            ordered_member_ids: Vec::new(),
            access: AccessControls::default(),
            create_date: None,
            modified_date: None,
            visibility: None,
            embargo: None,
            lease: None,
            files: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub const fn model(&self) -> &Arc<LegacyModel> {
        &self.model
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Whether the object has never been persisted.
    #[must_use]
    pub const fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub const fn mark_persisted(&mut self) {
        self.new_record = false;
    }

    #[must_use]
    pub fn responds_to(&self, attribute: &str) -> bool {
        self.model.responds_to(attribute)
    }

    /// Set a declared property.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the type does not declare `name`.
    pub fn set_property(
        &mut self,
        name: &str,
        value: LegacyValue,
    ) -> Result<(), CoreError> {
        if self.model.accessor(name) != Some(&Accessor::Property) {
            return Err(CoreError::Validation(format!(
                "{} has no property '{name}'",
                self.model.name()
            )));
        }
        self.properties.insert(name.to_string(), value);
        Ok(())
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&LegacyValue> {
        self.properties.get(name)
    }

    /// Mutable slot for a declared property, created as `Null` if unset.
    pub fn property_mut(&mut self, name: &str) -> Option<&mut LegacyValue> {
        if self.model.accessor(name) != Some(&Accessor::Property) {
            return None;
        }
        Some(
            self.properties
                .entry(name.to_string())
                .or_insert(LegacyValue::Null),
        )
    }

    /// Set the ids of a plural reflection.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the type does not declare `reflection`.
    pub fn set_relationship(
        &mut self,
        reflection: &str,
        ids: Vec<Id>,
    ) -> Result<(), CoreError> {
        if !self.model.reflections().unwrap_or_default().iter().any(|r| r == reflection) {
            return Err(CoreError::Validation(format!(
                "{} has no reflection '{reflection}'",
                self.model.name()
            )));
        }
        self.relationships.insert(reflection.to_string(), ids);
        Ok(())
    }

    /// Ids held by a plural reflection, in stored order.
    #[must_use]
    pub fn relationship(&self, reflection: &str) -> &[Id] {
        self.relationships.get(reflection).map_or(&[], Vec::as_slice)
    }

    /// Set (or clear) a singular foreign key.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `name` is not a foreign-key reflection.
    pub fn set_foreign_key(&mut self, name: &str, id: Option<Id>) -> Result<(), CoreError> {
        if self.model.accessor(name) != Some(&Accessor::ForeignKey) {
            return Err(CoreError::Validation(format!(
                "{} has no foreign key '{name}'",
                self.model.name()
            )));
        }
        match id {
            Some(id) => self.foreign_keys.insert(name.to_string(), id),
            None => self.foreign_keys.remove(name),
        };
        Ok(())
    }

    #[must_use]
    pub fn foreign_key(&self, name: &str) -> Option<&Id> {
        self.foreign_keys.get(name)
    }

    /// Read a supported attribute. `None` when the type does not support it.
    #[must_use]
    pub fn read(&self, attribute: &str) -> Option<LegacyValue> {
        match self.model.accessor(attribute)? {
            Accessor::Property => Some(
                self.properties
                    .get(attribute)
                    .cloned()
                    .unwrap_or(LegacyValue::Null),
            ),
            Accessor::Relationship { reflection } => Some(LegacyValue::List(
                self.relationship(reflection)
                    .iter()
                    .cloned()
                    .map(LegacyValue::Id)
                    .collect(),
            )),
            Accessor::ForeignKey => Some(
                self.foreign_keys
                    .get(attribute)
                    .cloned()
                    .map_or(LegacyValue::Null, LegacyValue::Id),
            ),
        }
    }

    #[must_use]
    pub fn ordered_member_ids(&self) -> &[Id] {
        &self.ordered_member_ids
    }

    pub fn set_ordered_member_ids(&mut self, ids: Vec<Id>) {
        self.ordered_member_ids = ids;
    }

    #[must_use]
    pub const fn access(&self) -> &AccessControls {
        &self.access
    }

    pub const fn access_mut(&mut self) -> &mut AccessControls {
        &mut self.access
    }

    #[must_use]
    pub const fn create_date(&self) -> Option<DateTime<Utc>> {
        self.create_date
    }

    pub const fn set_create_date(&mut self, date: Option<DateTime<Utc>>) {
        self.create_date = date;
    }

    #[must_use]
    pub const fn modified_date(&self) -> Option<DateTime<Utc>> {
        self.modified_date
    }

    pub const fn set_modified_date(&mut self, date: Option<DateTime<Utc>>) {
        self.modified_date = date;
    }

    #[must_use]
    pub const fn visibility(&self) -> Option<Visibility> {
        self.visibility
    }

    pub const fn set_visibility(&mut self, visibility: Option<Visibility>) {
        self.visibility = visibility;
    }

    #[must_use]
    pub const fn embargo(&self) -> Option<&LegacyRef> {
        self.embargo.as_ref()
    }

    pub fn set_embargo(&mut self, embargo: Option<LegacyRef>) {
        self.embargo = embargo;
    }

    #[must_use]
    pub const fn lease(&self) -> Option<&LegacyRef> {
        self.lease.as_ref()
    }

    pub fn set_lease(&mut self, lease: Option<LegacyRef>) {
        self.lease = lease;
    }

    #[must_use]
    pub fn file(&self, relation: UseRelation) -> Option<&PcdmFile> {
        self.files.get(&relation)
    }

    pub fn file_mut(&mut self, relation: UseRelation) -> Option<&mut PcdmFile> {
        self.files.get_mut(&relation)
    }

    #[must_use]
    pub const fn files(&self) -> &BTreeMap<UseRelation, PcdmFile> {
        &self.files
    }

    /// Attach (or replace) the file stored under `relation`.
    pub fn attach_file(&mut self, relation: UseRelation, file: PcdmFile) {
        self.files.insert(relation, file);
    }
}
