// rechain/src/dispatch/plan.rs

//! The pending plan of a dispatcher.

use std::mem;

/// One queued step application.
///
/// `config` is set only for factory steps that already received their
/// configuration argument while chaining.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedInvocation<V> {
  pub step_name: String,
  pub config: Option<V>,
}

impl<V> QueuedInvocation<V> {
  pub fn plain<S: Into<String>>(step_name: S) -> Self {
    Self {
      step_name: step_name.into(),
      config: None,
    }
  }

  pub fn configured<S: Into<String>>(step_name: S, config: V) -> Self {
    Self {
      step_name: step_name.into(),
      config: Some(config),
    }
  }
}

/// Queued invocations of the current chain-building episode ("scenario").
///
/// The scenario number identifies the episode: it changes every time the plan
/// is finalized or discarded, which is how stale chain handles are detected.
#[derive(Debug)]
pub(crate) struct PlanState<V> {
  entries: Vec<QueuedInvocation<V>>,
  scenario: u64,
}

impl<V> PlanState<V> {
  pub(crate) fn new() -> Self {
    Self {
      entries: Vec::new(),
      scenario: 0,
    }
  }

  pub(crate) fn scenario(&self) -> u64 {
    self.scenario
  }

  pub(crate) fn is_open(&self, scenario: u64) -> bool {
    self.scenario == scenario
  }

  pub(crate) fn push(&mut self, entry: QueuedInvocation<V>) {
    self.entries.push(entry);
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub(crate) fn step_names(&self) -> Vec<String> {
    self.entries.iter().map(|e| e.step_name.clone()).collect()
  }

  /// Takes the queued entries out and opens a new scenario.
  pub(crate) fn take(&mut self) -> Vec<QueuedInvocation<V>> {
    self.scenario = self.scenario.wrapping_add(1);
    mem::take(&mut self.entries)
  }
}
