// rechain/src/executor.rs

//! Runs a finalized plan against an input value under one of three strategies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{event, instrument, span, Level};

use crate::core::predicate::Predicate;
use crate::core::step::{StepCallable, StepFn};
use crate::core::value::Nullable;
use crate::dispatch::plan::QueuedInvocation;
use crate::error::{RechainError, RechainResult};
use crate::table::StepTable;

/// How the steps of a plan are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
  /// Thread each result into the next step; return null as soon as a result
  /// fails the predicate. An empty plan yields null.
  Every,
  /// Plain left-to-right composition. An empty plan yields the input.
  Map,
  /// Apply every step to the original input; return the first result that
  /// passes the predicate, or null. An empty plan yields null.
  Some,
}

impl Strategy {
  pub fn as_str(&self) -> &'static str {
    match self {
      Strategy::Every => "every",
      Strategy::Map => "map",
      Strategy::Some => "some",
    }
  }

  /// Executes `plan` against `input`.
  ///
  /// Factory steps are configured right before they run, so steps after an
  /// `every` failure or a `some` match are never configured nor applied.
  #[instrument(
    name = "Strategy::execute",
    skip_all,
    fields(strategy = %self, plan_len = plan.len()),
    err(level = "debug", Display)
  )]
  pub(crate) fn execute<V: Nullable>(
    self,
    table: &StepTable<V>,
    plan: Vec<QueuedInvocation<V>>,
    predicate: &Predicate<V>,
    input: V,
  ) -> RechainResult<V> {
    match self {
      Strategy::Map => {
        let mut cur = input;
        for (step_idx, entry) in plan.into_iter().enumerate() {
          let (name, f) = resolve(table, entry)?;
          cur = apply_step(&name, step_idx, &f, cur)?;
        }
        Ok(cur)
      }
      Strategy::Every => {
        if plan.is_empty() {
          return Ok(V::null());
        }
        let mut cur = input;
        for (step_idx, entry) in plan.into_iter().enumerate() {
          let (name, f) = resolve(table, entry)?;
          cur = apply_step(&name, step_idx, &f, cur)?;
          if !predicate(&cur) {
            event!(Level::DEBUG, step_name = %name, step_index = step_idx, "Predicate failed, aborting 'every'.");
            return Ok(V::null());
          }
        }
        Ok(cur)
      }
      Strategy::Some => {
        for (step_idx, entry) in plan.into_iter().enumerate() {
          let (name, f) = resolve(table, entry)?;
          let cur = apply_step(&name, step_idx, &f, input.clone())?;
          if predicate(&cur) {
            event!(Level::DEBUG, step_name = %name, step_index = step_idx, "Predicate passed, 'some' matched.");
            return Ok(cur);
          }
        }
        event!(Level::DEBUG, "No step satisfied the predicate.");
        Ok(V::null())
      }
    }
  }
}

impl fmt::Display for Strategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Strategy {
  type Err = RechainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "every" => Ok(Strategy::Every),
      "map" => Ok(Strategy::Map),
      "some" => Ok(Strategy::Some),
      other => Err(RechainError::UnknownStrategy(other.to_string())),
    }
  }
}

/// Turns a queued invocation into a one-argument function, configuring
/// factory steps with their queued configuration.
fn resolve<V: Nullable>(table: &StepTable<V>, entry: QueuedInvocation<V>) -> RechainResult<(String, StepFn<V>)> {
  let QueuedInvocation { step_name, config } = entry;
  let descriptor = table
    .get(&step_name)
    .ok_or_else(|| RechainError::Internal(format!("Queued step '{}' is not in the step table", step_name)))?;

  let f = match (&descriptor.callable, config) {
    (StepCallable::Plain(f), None) => f.clone(),
    (StepCallable::Factory(configure), Some(config)) => configure(config),
    (StepCallable::Factory(_), None) => return Err(RechainError::MissingConfig { step_name }),
    (StepCallable::Plain(_), Some(_)) => {
      return Err(RechainError::Internal(format!(
        "Plain step '{}' was queued with a configuration value",
        step_name
      )))
    }
  };
  Ok((step_name, f))
}

fn apply_step<V>(step_name: &str, step_idx: usize, f: &StepFn<V>, input: V) -> RechainResult<V> {
  let step_span = span!(Level::DEBUG, "step_execution", step_name = step_name, step_index = step_idx);
  let _step_span_guard = step_span.enter();
  f(input).map_err(|e| {
    event!(Level::ERROR, error = %e, "Step failed.");
    RechainError::Step(e)
  })
}
