// rechain/src/dispatch/execution.rs

//! Queueing, finalization and reset of a dispatcher's pending plan.
//!
//! The plan is taken out of the dispatcher (and a new scenario opened) before
//! any step runs, so a failing step never leaves a half-consumed chain behind.

use tracing::{event, instrument, Level};

use crate::core::value::Nullable;
use crate::dispatch::definition::Dispatcher;
use crate::dispatch::plan::QueuedInvocation;
use crate::error::{RechainError, RechainResult};

impl<V: Nullable> Dispatcher<V> {
  /// Runs the pending plan against `input` and resets it.
  ///
  /// Fails with `RechainError::ChainClosed` when nothing is queued and the
  /// dispatcher has steps; an empty dispatcher runs its empty plan instead.
  #[instrument(
    name = "Dispatcher::finalize_and_reset",
    skip_all,
    fields(strategy = %self.strategy),
    err(level = "debug", Display)
  )]
  pub fn finalize_and_reset(&self, input: V) -> RechainResult<V> {
    self.finalize(None, None, input)
  }

  /// Appends `entry` to the plan of `scenario`.
  pub(crate) fn enqueue(&self, scenario: u64, entry: QueuedInvocation<V>) -> RechainResult<()> {
    let mut state = self.plan.lock();
    if !state.is_open(scenario) {
      event!(Level::WARN, step_name = %entry.step_name, "Continuation on a closed chain.");
      return Err(RechainError::ChainClosed {
        step_name: Some(entry.step_name),
      });
    }
    event!(
      Level::TRACE,
      step_name = %entry.step_name,
      configured = entry.config.is_some(),
      "Queued continuation."
    );
    state.push(entry);
    Ok(())
  }

  /// Terminal call of `scenario`: queues `entry` last and runs the plan.
  #[instrument(
    name = "Dispatcher::terminate",
    skip_all,
    fields(strategy = %self.strategy, step_name = %entry.step_name),
    err(level = "debug", Display)
  )]
  pub(crate) fn terminate(&self, scenario: u64, entry: QueuedInvocation<V>, input: V) -> RechainResult<V> {
    self.finalize(Some(scenario), Some(entry), input)
  }

  /// Discards the plan of `scenario` after an error aborted it. A newer
  /// scenario is left alone.
  pub(crate) fn abort(&self, scenario: u64) {
    let mut state = self.plan.lock();
    if state.is_open(scenario) {
      let discarded = state.take();
      event!(Level::DEBUG, num_discarded = discarded.len(), "Chain aborted, pending plan discarded.");
    }
  }

  /// Shared by direct invocation (`scenario == None`) and terminal invoker
  /// calls. The lock is released before the strategy runs.
  pub(crate) fn finalize(
    &self,
    scenario: Option<u64>,
    terminal: Option<QueuedInvocation<V>>,
    input: V,
  ) -> RechainResult<V> {
    let plan = {
      let mut state = self.plan.lock();

      if let Some(scenario) = scenario {
        if !state.is_open(scenario) {
          event!(Level::WARN, "Terminal call on a closed chain.");
          return Err(RechainError::ChainClosed {
            step_name: terminal.map(|t| t.step_name),
          });
        }
      }

      if let Some(entry) = terminal {
        state.push(entry);
      }

      if state.is_empty() && !self.table.is_empty() {
        state.take();
        event!(Level::WARN, "Dispatcher invoked directly with no queued steps.");
        return Err(RechainError::ChainClosed { step_name: None });
      }

      state.take()
    };

    event!(Level::DEBUG, plan_len = plan.len(), "Plan finalized.");
    self.strategy.execute(&self.table, plan, &self.predicate, input)
  }
}
