// rechain/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::core::step::StepKind;

#[derive(Debug, Error)]
pub enum RechainError {
  #[error("Duplicate step name: {step_name}")]
  DuplicateStepName { step_name: String },

  #[error("Step not found: {step_name}")]
  UnknownStep { step_name: String },

  /// The chain this call belongs to was already finalized, or the dispatcher
  /// was invoked directly with nothing queued.
  #[error("Chain is closed{}", at_step(.step_name))]
  ChainClosed { step_name: Option<String> },

  #[error("Step '{step_name}' is a {kind} step and cannot be called with {given} argument(s)")]
  ArityMismatch {
    step_name: String,
    kind: StepKind,
    given: usize,
  },

  #[error("Step '{step_name}' is a {actual} step, expected a {expected} step")]
  KindMismatch {
    step_name: String,
    expected: StepKind,
    actual: StepKind,
  },

  #[error("Factory step '{step_name}' was chained without its configuration argument")]
  MissingConfig { step_name: String },

  /// Error raised by a user-provided step function, passed through as-is.
  #[error(transparent)]
  Step(AnyhowError),

  #[error("Unknown strategy '{0}' (expected every, map or some)")]
  UnknownStrategy(String),

  #[error("Internal rechain error: {0}")]
  Internal(String),
}

impl RechainError {
  /// Whether this error came from a step function rather than from chaining.
  pub fn is_step_failure(&self) -> bool {
    matches!(self, RechainError::Step(_))
  }
}

impl From<AnyhowError> for RechainError {
  fn from(err: AnyhowError) -> Self {
    // A RechainError coming back through anyhow (e.g. from a nested dispatcher
    // used inside a step) stays wrapped: it belongs to the step, not to us.
    RechainError::Step(err)
  }
}

fn at_step(step_name: &Option<String>) -> String {
  step_name
    .as_deref()
    .map(|s| format!(" (at step '{}')", s))
    .unwrap_or_default()
}

pub type RechainResult<T, E = RechainError> = std::result::Result<T, E>;
