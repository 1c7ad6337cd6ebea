//! Visibility propagation and finder integration tests

use std::sync::Arc;

use hyrax_core::enums::{Behavior, Visibility};
use hyrax_core::legacy::EMBARGO_MODEL;
use hyrax_core::{
    Id, LegacyModel, LegacyObject, LegacyRef, LegacyStore, Persister, QueryService,
};
use hyrax_services::memory::{MemoryLegacyStore, MemoryResourceStore};
use hyrax_services::{
    ActiveFedoraFinder, PropagationServices, ResourceFinder, VisibilityPropagator,
    VisibilitySource,
};
use hyrax_wings::{
    LegacyConverter, ModelRegistry, ModelTransformer, PrefixMinter, ResourceClassCache,
};
use pretty_assertions::assert_eq;

struct Fixture {
    legacy: Arc<MemoryLegacyStore>,
    resources: Arc<MemoryResourceStore>,
    registry: Arc<ModelRegistry>,
    transformer: ModelTransformer,
}

impl Fixture {
    fn new() -> Self {
        let resources = Arc::new(MemoryResourceStore::new());
        let mut registry = ModelRegistry::new();
        registry.register(work_model());
        registry.register(file_set_model());
        registry.register(collection_model());
        Self {
            legacy: Arc::new(MemoryLegacyStore::new()),
            transformer: ModelTransformer::new(
                Arc::new(ResourceClassCache::new()),
                Arc::new(PrefixMinter::new("hx")),
                resources.clone(),
            ),
            resources,
            registry: Arc::new(registry),
        }
    }

    fn services(&self) -> PropagationServices {
        PropagationServices {
            legacy_store: self.legacy.clone(),
            query_service: self.resources.clone(),
            persister: self.resources.clone(),
        }
    }

    fn active_fedora_finder(&self) -> ActiveFedoraFinder {
        ActiveFedoraFinder::new(
            ResourceFinder::new(self.resources.clone()),
            LegacyConverter::new(Arc::clone(&self.registry)),
        )
    }
}

fn work_model() -> Arc<LegacyModel> {
    LegacyModel::builder("GenericWork")
        .property("title")
        .reflection("members")
        .behavior(Behavior::Work)
        .build()
}

fn file_set_model() -> Arc<LegacyModel> {
    LegacyModel::builder("FileSet").behavior(Behavior::FileSet).build()
}

fn collection_model() -> Arc<LegacyModel> {
    LegacyModel::builder("Collection")
        .behavior(Behavior::Collection)
        .build()
}

fn work_with_members(id: &str, members: &[&str]) -> LegacyObject {
    let mut work = LegacyObject::new(work_model()).with_id(id);
    work.set_ordered_member_ids(members.iter().copied().map(Id::new).collect());
    work.set_visibility(Some(Visibility::Restricted));
    work
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[test]
fn dispatch_selects_propagator_by_source_kind() {
    let fx = Fixture::new();
    let mut work = work_with_members("w1", &[]);
    let resource = fx.transformer.build(&mut work).unwrap();

    let legacy = VisibilityPropagator::for_source(VisibilitySource::Legacy(work), &fx.services());
    let valkyrie =
        VisibilityPropagator::for_source(VisibilitySource::Resource(resource), &fx.services());
    let collection = VisibilityPropagator::for_source(
        VisibilitySource::Legacy(LegacyObject::new(collection_model()).with_id("c1")),
        &fx.services(),
    );

    assert!(matches!(legacy, Some(VisibilityPropagator::Legacy(_))));
    assert!(matches!(valkyrie, Some(VisibilityPropagator::Resource(_))));
    assert!(collection.is_none());
}

// ---------------------------------------------------------------------------
// Legacy propagation
// ---------------------------------------------------------------------------

#[test]
fn legacy_propagation_updates_file_sets_and_copies_embargo() {
    let fx = Fixture::new();
    for id in ["fs-1", "fs-2"] {
        let mut file_set = LegacyObject::new(file_set_model()).with_id(id);
        file_set.set_visibility(Some(Visibility::Open));
        fx.legacy.insert(file_set);
    }
    let mut work = work_with_members("w1", &["fs-1", "fs-2", "fs-missing"]);
    work.set_embargo(Some(LegacyRef::Id(Id::new("emb-1"))));

    let propagator =
        VisibilityPropagator::for_source(VisibilitySource::Legacy(work), &fx.services()).unwrap();
    let updated = propagator.propagate().unwrap();

    assert_eq!(updated, 2);
    for id in ["fs-1", "fs-2"] {
        let member = fx.legacy.find(id).unwrap().unwrap();
        assert_eq!(member.visibility(), Some(Visibility::Restricted));
        assert_eq!(member.embargo().and_then(LegacyRef::id), Some(Id::new("emb-1")));
    }
}

#[test]
fn legacy_propagation_surfaces_save_failures() {
    let fx = Fixture::new();
    fx.legacy
        .insert(LegacyObject::new(file_set_model()).with_id("fs-1"));
    fx.legacy.fail_saves(true);

    let propagator = VisibilityPropagator::for_source(
        VisibilitySource::Legacy(work_with_members("w1", &["fs-1"])),
        &fx.services(),
    )
    .unwrap();

    assert!(propagator.propagate().is_err());
}

// ---------------------------------------------------------------------------
// Resource propagation
// ---------------------------------------------------------------------------

#[test]
fn resource_propagation_updates_members_in_the_store() {
    let fx = Fixture::new();
    let mut embargo = LegacyObject::new(LegacyModel::builder(EMBARGO_MODEL).build()).with_id("emb-1");
    fx.resources
        .save(&fx.transformer.build(&mut embargo).unwrap())
        .unwrap();

    for id in ["fs-1", "fs-2"] {
        let mut file_set = LegacyObject::new(file_set_model()).with_id(id);
        file_set.set_visibility(Some(Visibility::Open));
        fx.resources
            .save(&fx.transformer.build(&mut file_set).unwrap())
            .unwrap();
    }

    let mut work = work_with_members("w1", &["fs-2", "fs-1"]);
    work.set_embargo(Some(LegacyRef::Id(Id::new("emb-1"))));
    let source = fx.transformer.build(&mut work).unwrap();

    let updated = VisibilityPropagator::for_source(VisibilitySource::Resource(source), &fx.services())
        .unwrap()
        .propagate()
        .unwrap();

    assert_eq!(updated, 2);
    for id in ["fs-1", "fs-2"] {
        let member = fx.resources.find_by(&Id::new(id)).unwrap().unwrap();
        assert_eq!(member.visibility(), Some(Visibility::Restricted));
        assert_eq!(
            member.nested("embargo").map(|e| e.id().clone()),
            Some(Id::new("emb-1"))
        );
    }
}

// ---------------------------------------------------------------------------
// Finders
// ---------------------------------------------------------------------------

#[test]
fn resource_finder_returns_none_for_missing_ids() {
    let fx = Fixture::new();
    let finder = ResourceFinder::new(fx.resources.clone());
    assert!(finder.find("nope").unwrap().is_none());
}

#[test]
fn active_fedora_finder_converts_found_resources() {
    let fx = Fixture::new();
    let mut work = work_with_members("w1", &["fs-1"]);
    let saved = fx
        .resources
        .save(&fx.transformer.build(&mut work).unwrap())
        .unwrap();

    let found = fx.active_fedora_finder().find("w1").unwrap().unwrap();

    assert_eq!(found.id(), Some(saved.id().as_str()));
    assert_eq!(found.model().name(), "GenericWork");
    assert!(!found.is_new_record());
    assert_eq!(found.ordered_member_ids(), [Id::new("fs-1")]);
    assert_eq!(found.visibility(), Some(Visibility::Restricted));
    assert!(fx.active_fedora_finder().find("missing").unwrap().is_none());
}
