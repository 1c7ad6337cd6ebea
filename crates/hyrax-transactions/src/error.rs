/// A transaction stopped at `step` for `reason`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("step '{step}' failed ({reason}): {message}")]
pub struct StepFailure {
    pub step: String,
    pub reason: String,
    pub message: String,
}
