//! Named, ordered pipelines of steps.
//!
//! A [`Transaction`] resolves all of its step keys when it is built, so a
//! typo in a key is caught at startup. [`Transaction::call`] threads the
//! work through each step in order and stops at the first failure.

use std::sync::Arc;

use hyrax_core::Resource;

use crate::container::{Container, ContainerError};
use crate::error::StepFailure;
use crate::step::{Step, StepArgs};

pub const CREATE_WORK_STEPS: [&str; 8] = [
    "operations.set_default_admin_set",
    "operations.ensure_admin_set",
    "create_operations.add_creation_data",
    "operations.set_uploaded_date",
    "operations.set_modified_date",
    "create_operations.find_collection_id",
    "operations.validate_files",
    "operations.save_work",
];

pub const UPDATE_WORK_STEPS: [&str; 4] = [
    "operations.ensure_admin_set",
    "operations.set_modified_date",
    "operations.validate_files",
    "operations.save_work",
];

pub const DESTROY_WORK_STEPS: [&str; 3] = [
    "delete_operations.cleanup_file_sets",
    "delete_operations.remove_from_collections",
    "delete_operations.delete_work",
];

pub struct Transaction {
    name: String,
    steps: Vec<(String, Arc<dyn Step>)>,
}

impl Transaction {
    /// # Errors
    ///
    /// Returns `ContainerError::UnregisteredStep` for the first key the
    /// container does not know.
    pub fn new<S: AsRef<str>>(
        name: impl Into<String>,
        container: &Container,
        keys: &[S],
    ) -> Result<Self, ContainerError> {
        let steps = keys
            .iter()
            .map(|key| {
                let key = key.as_ref();
                container.resolve(key).map(|step| (key.to_string(), step))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.into(),
            steps,
        })
    }

    /// # Errors
    ///
    /// Returns `ContainerError` if the container lacks a standard step.
    pub fn create_work(container: &Container) -> Result<Self, ContainerError> {
        Self::new("create_work", container, &CREATE_WORK_STEPS)
    }

    /// # Errors
    ///
    /// Returns `ContainerError` if the container lacks a standard step.
    pub fn update_work(container: &Container) -> Result<Self, ContainerError> {
        Self::new("update_work", container, &UPDATE_WORK_STEPS)
    }

    /// # Errors
    ///
    /// Returns `ContainerError` if the container lacks a standard step.
    pub fn destroy_work(container: &Container) -> Result<Self, ContainerError> {
        Self::new("destroy_work", container, &DESTROY_WORK_STEPS)
    }

    /// Look up one of the named transactions.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::UnknownTransaction` if `name` is not one of
    /// `create_work`, `update_work` or `destroy_work`.
    pub fn named(name: &str, container: &Container) -> Result<Self, ContainerError> {
        match name {
            "create_work" => Self::create_work(container),
            "update_work" => Self::update_work(container),
            "destroy_work" => Self::destroy_work(container),
            other => Err(ContainerError::UnknownTransaction(other.to_string())),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn step_keys(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|(key, _)| key.as_str())
    }

    /// Run every step in order.
    ///
    /// # Errors
    ///
    /// Returns the first step's [`StepFailure`]; later steps are not run.
    pub fn call(&self, work: Resource, args: &StepArgs) -> Result<Resource, StepFailure> {
        let mut work = work;
        for (key, step) in &self.steps {
            tracing::debug!(transaction = %self.name, step = %key, work = %work.id(), "running step");
            work = step.call(work, args.for_step(key)).map_err(|failure| {
                tracing::warn!(
                    transaction = %self.name,
                    step = %key,
                    reason = %failure.reason,
                    "transaction step failed"
                );
                StepFailure {
                    step: key.clone(),
                    reason: failure.reason,
                    message: failure.message,
                }
            })?;
        }
        tracing::info!(transaction = %self.name, work = %work.id(), "transaction complete");
        Ok(work)
    }
}

impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("name", &self.name)
            .field("steps", &self.step_keys().collect::<Vec<_>>())
            .finish()
    }
}
