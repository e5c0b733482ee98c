// rechain/src/dispatch/definition.rs

//! Contains the `Dispatcher<V>` struct and its step lookup.

use std::fmt;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{event, Level};

use crate::builder::DispatcherBuilder;
use crate::core::control::Args;
use crate::core::predicate::Predicate;
use crate::core::value::Nullable;
use crate::dispatch::invoker::{Outcome, StepInvoker};
use crate::dispatch::plan::PlanState;
use crate::error::{RechainError, RechainResult};
use crate::executor::Strategy;
use crate::table::StepTable;

/// A chainable dispatcher over a fixed set of named steps.
///
/// Each step name is reachable through [`Dispatcher::step`]. Calling the
/// returned [`StepInvoker`] either queues the step and hands back a [`Chain`]
/// for further chaining, or queues it as the last entry and runs the whole
/// plan under the dispatcher's [`Strategy`].
///
/// ```
/// use rechain::{Args, StepDescriptor};
/// use serde_json::{json, Value};
///
/// let chain = rechain::map(vec![
///   StepDescriptor::plain("double", |x: Value| Ok(json!(x.as_i64().unwrap_or(0) * 2))),
///   StepDescriptor::factory("divide_by", |d: Value| {
///     move |x: Value| Ok(json!(x.as_i64().unwrap_or(0) / d.as_i64().unwrap_or(1)))
///   }),
/// ])?;
///
/// let result = chain.step("double")?.step("divide_by")?.call_with(json!(3), json!(6))?;
/// assert_eq!(result, json!(4));
/// # Ok::<(), rechain::RechainError>(())
/// ```
///
/// The pending plan is shared by every chain built from the same dispatcher.
/// One scenario at a time is expected per dispatcher: interleaving two chains
/// mixes their steps into one plan. Build one dispatcher per concurrent task.
///
/// [`Chain`]: crate::dispatch::invoker::Chain
pub struct Dispatcher<V: Nullable = Value> {
  pub(crate) table: StepTable<V>,
  pub(crate) strategy: Strategy,
  pub(crate) predicate: Predicate<V>,
  pub(crate) plan: Mutex<PlanState<V>>,
}

impl<V: Nullable> Dispatcher<V> {
  pub(crate) fn new(strategy: Strategy, table: StepTable<V>, predicate: Predicate<V>) -> Self {
    event!(Level::DEBUG, %strategy, num_steps = table.len(), "Dispatcher created.");
    Self {
      table,
      strategy,
      predicate,
      plan: Mutex::new(PlanState::new()),
    }
  }

  /// Starts configuring a dispatcher for `strategy`.
  pub fn builder(strategy: Strategy) -> DispatcherBuilder<V> {
    DispatcherBuilder::new(strategy)
  }

  pub fn strategy(&self) -> Strategy {
    self.strategy
  }

  pub fn table(&self) -> &StepTable<V> {
    &self.table
  }

  /// Step names in declaration order.
  pub fn step_names(&self) -> Vec<&str> {
    self.table.names().collect()
  }

  /// Names of the steps queued so far in the current scenario.
  pub fn pending(&self) -> Vec<String> {
    self.plan.lock().step_names()
  }

  /// Discards the pending plan. Handles from the discarded scenario are closed.
  pub fn reset(&self) {
    let discarded = self.plan.lock().take();
    if !discarded.is_empty() {
      event!(Level::DEBUG, num_discarded = discarded.len(), "Pending plan discarded.");
    }
  }

  /// Returns the invoker for `name`, continuing the pending plan.
  ///
  /// An unknown name fails with `RechainError::UnknownStep` and discards the
  /// pending plan.
  pub fn step(&self, name: &str) -> RechainResult<StepInvoker<'_, V>> {
    let scenario = self.plan.lock().scenario();
    self.step_in(scenario, name)
  }

  /// Single-entry form of `self.step(name)?.call(args)`.
  pub fn invoke(&self, name: &str, args: Args<V>) -> RechainResult<Outcome<'_, V>> {
    self.step(name)?.call(args)
  }

  /// Invokes the dispatcher itself with `input`.
  ///
  /// Runs the pending plan if there is one. With nothing queued this fails with
  /// `RechainError::ChainClosed`, unless the dispatcher has no steps at all, in
  /// which case the empty plan runs (`null` for every/some, `input` for map).
  pub fn call(&self, input: V) -> RechainResult<V> {
    self.finalize_and_reset(input)
  }

  pub(crate) fn step_in(&self, scenario: u64, name: &str) -> RechainResult<StepInvoker<'_, V>> {
    if !self.plan.lock().is_open(scenario) {
      event!(Level::WARN, step_name = name, "Step accessed on a closed chain.");
      return Err(RechainError::ChainClosed {
        step_name: Some(name.to_string()),
      });
    }

    match self.table.get(name) {
      Some(descriptor) => Ok(StepInvoker::new(self, descriptor.name(), descriptor.kind(), scenario)),
      None => {
        event!(Level::ERROR, step_name = name, "Unknown step.");
        self.abort(scenario);
        Err(RechainError::UnknownStep {
          step_name: name.to_string(),
        })
      }
    }
  }
}

impl<V: Nullable> fmt::Debug for Dispatcher<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Dispatcher")
      .field("strategy", &self.strategy)
      .field("steps", &self.step_names())
      .field("pending", &self.pending())
      .finish()
  }
}
