//! The unit of work a transaction is made of.

use std::collections::BTreeMap;

use hyrax_core::Resource;

/// Why a step rejected the work. `reason` is a short code such as
/// `no_admin_set_id`; `message` is for humans.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}: {message}")]
pub struct Failure {
    pub reason: String,
    pub message: String,
}

impl Failure {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            message: reason.replace('_', " "),
            reason,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// One named, failable transformation of a work.
pub trait Step: Send + Sync {
    /// Take the work in progress and return it (possibly changed), or fail.
    ///
    /// `args` are the caller-supplied arguments for this step, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`Failure`] with a short reason code.
    fn call(&self, work: Resource, args: Option<&serde_json::Value>) -> Result<Resource, Failure>;
}

/// Per-step arguments, keyed by the step's container key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepArgs {
    args: BTreeMap<String, serde_json::Value>,
}

impl StepArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, step_key: impl Into<String>, value: serde_json::Value) -> Self {
        self.args.insert(step_key.into(), value);
        self
    }

    #[must_use]
    pub fn for_step(&self, step_key: &str) -> Option<&serde_json::Value> {
        self.args.get(step_key)
    }

    pub fn step_keys(&self) -> impl Iterator<Item = &str> {
        self.args.keys().map(String::as_str)
    }
}

/// Read a string argument, e.g. `{"user": "depositor@example.com"}`.
pub(crate) fn string_arg<'a>(args: Option<&'a serde_json::Value>, name: &str) -> Option<&'a str> {
    args?.get(name)?.as_str().filter(|s| !s.is_empty())
}
