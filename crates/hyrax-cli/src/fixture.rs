//! JSON fixtures describing a legacy type and one object of that type.
//!
//! ```json
//! {
//!   "model": { "name": "GenericWork", "properties": ["title"],
//!              "reflections": ["members", "admin_set_id"], "behaviors": ["work"] },
//!   "id": "w1",
//!   "properties": { "title": ["On Hyraxes"] },
//!   "foreign_keys": { "admin_set_id": "as-1" },
//!   "members": ["fs-1"],
//!   "visibility": "open"
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use hyrax_core::enums::{Behavior, Visibility};
use hyrax_core::{Id, LegacyModel, LegacyObject, LegacyRef, LegacyValue};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ModelFixture {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub reflections: Vec<String>,
    #[serde(default)]
    pub behaviors: Vec<Behavior>,
}

#[derive(Debug, Deserialize)]
pub struct ObjectFixture {
    pub model: ModelFixture,
    #[serde(default)]
    pub id: Option<String>,
    /// Mark the object as already persisted.
    #[serde(default)]
    pub persisted: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub relationships: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub foreign_keys: BTreeMap<String, String>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub embargo_id: Option<String>,
    #[serde(default)]
    pub lease_id: Option<String>,
}

impl ObjectFixture {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid fixture {}", path.display()))
    }

    #[must_use]
    pub fn legacy_model(&self) -> Arc<LegacyModel> {
        let mut builder = LegacyModel::builder(self.model.name.as_str())
            .properties(self.model.properties.iter().map(String::as_str));
        for reflection in &self.model.reflections {
            builder = builder.reflection(reflection.as_str());
        }
        for behavior in &self.model.behaviors {
            builder = builder.behavior(*behavior);
        }
        builder.build()
    }

    pub fn into_object(self) -> anyhow::Result<LegacyObject> {
        let mut object = LegacyObject::new(self.legacy_model());
        if let Some(id) = self.id {
            object.set_id(id);
        }
        if self.persisted {
            object.mark_persisted();
        }

        for (name, value) in self.properties {
            object.set_property(&name, LegacyValue::from_json(value))?;
        }
        for (reflection, ids) in self.relationships {
            object.set_relationship(&reflection, ids.into_iter().map(Id::new).collect())?;
        }
        for (name, id) in self.foreign_keys {
            object.set_foreign_key(&name, Some(Id::new(id)))?;
        }

        object.set_ordered_member_ids(self.members.into_iter().map(Id::new).collect());
        object.set_visibility(self.visibility);
        object.set_embargo(self.embargo_id.map(|id| LegacyRef::Id(Id::new(id))));
        object.set_lease(self.lease_id.map(|id| LegacyRef::Id(Id::new(id))));
        Ok(object)
    }
}
