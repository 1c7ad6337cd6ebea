//! Registry of steps under `namespace.step_name` keys.
//!
//! Built once at startup and read-only afterwards. Registering a key twice
//! fails the build. Resolving an unknown key is a configuration error
//! surfaced when a transaction is constructed.

use std::collections::BTreeMap;
use std::sync::Arc;

use hyrax_core::{Id, Persister, QueryService};

use crate::step::Step;
use crate::steps::{
    AddCreationDataStep, CleanupFileSetsStep, DeleteWorkStep, EnsureAdminSetStep,
    FindCollectionIdStep, RemoveFromCollectionsStep, SaveWorkStep, SetDefaultAdminSetStep,
    SetModifiedDateStep, SetUploadedDateStep, ValidateFilesStep,
};

pub const OPERATIONS: &str = "operations";
pub const CREATE_OPERATIONS: &str = "create_operations";
pub const DELETE_OPERATIONS: &str = "delete_operations";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContainerError {
    #[error("No step registered under '{0}'")]
    UnregisteredStep(String),

    #[error("No transaction named '{0}'")]
    UnknownTransaction(String),

    #[error("Step '{0}' is registered more than once")]
    DuplicateStep(String),
}

/// Collaborators the standard steps need.
#[derive(Clone)]
pub struct StepServices {
    pub query_service: Arc<dyn QueryService>,
    pub persister: Arc<dyn Persister>,
    pub default_admin_set_id: Id,
}

pub struct Container {
    steps: BTreeMap<String, Arc<dyn Step>>,
}

impl Container {
    #[must_use]
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder {
            steps: BTreeMap::new(),
            duplicate: None,
        }
    }

    /// The container with every standard step registered.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::DuplicateStep` if two standard steps share a key.
    pub fn standard(services: &StepServices) -> Result<Self, ContainerError> {
        let persister = &services.persister;
        let query_service = &services.query_service;

        Self::builder()
            .namespace(OPERATIONS, |ops| {
                ops.register("ensure_admin_set", EnsureAdminSetStep)
                    .register(
                        "set_default_admin_set",
                        SetDefaultAdminSetStep::new(services.default_admin_set_id.clone()),
                    )
                    .register("set_modified_date", SetModifiedDateStep)
                    .register("set_uploaded_date", SetUploadedDateStep)
                    .register("save_work", SaveWorkStep::new(Arc::clone(persister)))
                    .register("validate_files", ValidateFilesStep)
            })
            .namespace(CREATE_OPERATIONS, |ops| {
                ops.register("add_creation_data", AddCreationDataStep)
                    .register("find_collection_id", FindCollectionIdStep)
            })
            .namespace(DELETE_OPERATIONS, |ops| {
                ops.register(
                    "cleanup_file_sets",
                    CleanupFileSetsStep::new(Arc::clone(query_service), Arc::clone(persister)),
                )
                .register(
                    "remove_from_collections",
                    RemoveFromCollectionsStep::new(Arc::clone(query_service), Arc::clone(persister)),
                )
                .register("delete_work", DeleteWorkStep::new(Arc::clone(persister)))
            })
            .build()
    }

    /// # Errors
    ///
    /// Returns `ContainerError::UnregisteredStep` if nothing is registered under `key`.
    pub fn resolve(&self, key: &str) -> Result<Arc<dyn Step>, ContainerError> {
        self.steps
            .get(key)
            .cloned()
            .ok_or_else(|| ContainerError::UnregisteredStep(key.to_string()))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.steps.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }
}

pub struct ContainerBuilder {
    steps: BTreeMap<String, Arc<dyn Step>>,
    duplicate: Option<String>,
}

impl ContainerBuilder {
    /// Register a step under a top-level key.
    #[must_use]
    pub fn register(mut self, key: impl Into<String>, step: impl Step + 'static) -> Self {
        self.insert(key.into(), Arc::new(step));
        self
    }

    /// Register steps under `name.`.
    #[must_use]
    pub fn namespace<F>(mut self, name: &str, register: F) -> Self
    where
        F: FnOnce(Namespace) -> Namespace,
    {
        let namespace = register(Namespace {
            steps: BTreeMap::new(),
            duplicate: None,
        });
        if let Some(key) = namespace.duplicate {
            self.duplicate.get_or_insert(format!("{name}.{key}"));
        }
        for (key, step) in namespace.steps {
            self.insert(format!("{name}.{key}"), step);
        }
        self
    }

    /// # Errors
    ///
    /// Returns `ContainerError::DuplicateStep` naming the first key that was
    /// registered twice.
    pub fn build(self) -> Result<Container, ContainerError> {
        match self.duplicate {
            Some(key) => Err(ContainerError::DuplicateStep(key)),
            None => Ok(Container { steps: self.steps }),
        }
    }

    fn insert(&mut self, key: String, step: Arc<dyn Step>) {
        record_insert(&mut self.steps, &mut self.duplicate, key, step);
    }
}

pub struct Namespace {
    steps: BTreeMap<String, Arc<dyn Step>>,
    duplicate: Option<String>,
}

impl Namespace {
    #[must_use]
    pub fn register(mut self, key: impl Into<String>, step: impl Step + 'static) -> Self {
        record_insert(&mut self.steps, &mut self.duplicate, key.into(), Arc::new(step));
        self
    }
}

/// Insert unless the key is taken; the first taken key is kept in `duplicate`.
fn record_insert(
    steps: &mut BTreeMap<String, Arc<dyn Step>>,
    duplicate: &mut Option<String>,
    key: String,
    step: Arc<dyn Step>,
) {
    if steps.contains_key(&key) {
        tracing::warn!(key = %key, "step registered more than once");
        duplicate.get_or_insert(key);
    } else {
        steps.insert(key, step);
    }
}
