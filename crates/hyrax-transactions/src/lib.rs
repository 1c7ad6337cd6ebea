//! Work transactions: named, ordered pipelines of failable steps resolved
//! from a namespaced [`Container`].

pub mod container;
pub mod error;
pub mod step;
pub mod steps;
pub mod transaction;

#[cfg(test)]
mod test_support;

pub use container::{Container, ContainerBuilder, ContainerError, StepServices};
pub use error::StepFailure;
pub use step::{Failure, Step, StepArgs};
pub use transaction::Transaction;
