// rechain/src/dispatch/invoker.rs

//! Invoker handles returned while chaining: `StepInvoker` for one step name,
//! `Chain` for the dispatcher handed back by a continuation.

use std::fmt;

use tracing::{event, Level};

use crate::core::control::Args;
use crate::core::step::StepKind;
use crate::core::value::Nullable;
use crate::dispatch::definition::Dispatcher;
use crate::dispatch::plan::QueuedInvocation;
use crate::error::{RechainError, RechainResult};

/// Result of an invoker call: either the chain continues, or the plan ran.
#[derive(Debug)]
pub enum Outcome<'a, V: Nullable> {
  Continue(Chain<'a, V>),
  Done(V),
}

impl<'a, V: Nullable> Outcome<'a, V> {
  pub fn is_done(&self) -> bool {
    matches!(self, Outcome::Done(_))
  }

  pub fn into_value(self) -> Option<V> {
    match self {
      Outcome::Done(v) => Some(v),
      Outcome::Continue(_) => None,
    }
  }

  pub fn into_chain(self) -> Option<Chain<'a, V>> {
    match self {
      Outcome::Continue(chain) => Some(chain),
      Outcome::Done(_) => None,
    }
  }
}

/// A callable bound to one step name of a dispatcher, within one scenario.
pub struct StepInvoker<'a, V: Nullable> {
  dispatcher: &'a Dispatcher<V>,
  step_name: &'a str,
  kind: StepKind,
  scenario: u64,
}

impl<'a, V: Nullable> StepInvoker<'a, V> {
  pub(crate) fn new(dispatcher: &'a Dispatcher<V>, step_name: &'a str, kind: StepKind, scenario: u64) -> Self {
    Self {
      dispatcher,
      step_name,
      kind,
      scenario,
    }
  }

  pub fn name(&self) -> &'a str {
    self.step_name
  }

  pub fn kind(&self) -> StepKind {
    self.kind
  }

  /// Calls the step, deciding from the step kind and the arity of `args`
  /// whether this continues the chain or runs the plan.
  ///
  /// A single argument to a factory step is always its configuration; factory
  /// steps run the plan only when given configuration and input.
  pub fn call(self, args: Args<V>) -> RechainResult<Outcome<'a, V>> {
    match (self.kind, args) {
      (StepKind::Plain, Args::One(input)) => self.run(None, input).map(Outcome::Done),
      (StepKind::Factory, Args::One(config)) => self.queue(Some(config)).map(Outcome::Continue),
      (StepKind::Factory, Args::Two(config, input)) => self.run(Some(config), input).map(Outcome::Done),
      (StepKind::Plain, Args::Two(..)) => Err(self.fail(RechainError::ArityMismatch {
        step_name: self.step_name.to_string(),
        kind: self.kind,
        given: 2,
      })),
    }
  }

  /// Terminal call of a plain step with the input value.
  pub fn apply(self, input: V) -> RechainResult<V> {
    self.expect_kind(StepKind::Plain)?;
    self.run(None, input)
  }

  /// Continuation call of a factory step with its configuration.
  pub fn configure(self, config: V) -> RechainResult<Chain<'a, V>> {
    self.expect_kind(StepKind::Factory)?;
    self.queue(Some(config))
  }

  /// Terminal call of a factory step with its configuration and the input value.
  pub fn call_with(self, config: V, input: V) -> RechainResult<V> {
    self.expect_kind(StepKind::Factory)?;
    self.run(Some(config), input)
  }

  /// Queues this step without arguments and moves on to `next`, as in
  /// `required.category`. Only plain steps can be chained this way.
  pub fn step(self, next: &str) -> RechainResult<StepInvoker<'a, V>> {
    if self.kind == StepKind::Factory {
      return Err(self.fail(RechainError::MissingConfig {
        step_name: self.step_name.to_string(),
      }));
    }
    self.queue(None)?.step(next)
  }

  fn queue(&self, config: Option<V>) -> RechainResult<Chain<'a, V>> {
    let entry = self.entry(config);
    self.dispatcher.enqueue(self.scenario, entry)?;
    Ok(Chain {
      dispatcher: self.dispatcher,
      scenario: self.scenario,
    })
  }

  fn run(&self, config: Option<V>, input: V) -> RechainResult<V> {
    let entry = self.entry(config);
    self.dispatcher.terminate(self.scenario, entry, input)
  }

  fn entry(&self, config: Option<V>) -> QueuedInvocation<V> {
    match config {
      Some(config) => QueuedInvocation::configured(self.step_name, config),
      None => QueuedInvocation::plain(self.step_name),
    }
  }

  fn expect_kind(&self, expected: StepKind) -> RechainResult<()> {
    if self.kind == expected {
      return Ok(());
    }
    Err(self.fail(RechainError::KindMismatch {
      step_name: self.step_name.to_string(),
      expected,
      actual: self.kind,
    }))
  }

  /// Aborts the scenario this invoker belongs to and hands back `err`.
  fn fail(&self, err: RechainError) -> RechainError {
    event!(Level::ERROR, step_name = self.step_name, error = %err, "Invalid step call.");
    self.dispatcher.abort(self.scenario);
    err
  }
}

impl<V: Nullable> fmt::Debug for StepInvoker<'_, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StepInvoker")
      .field("step_name", &self.step_name)
      .field("kind", &self.kind)
      .field("scenario", &self.scenario)
      .finish()
  }
}

/// The dispatcher as handed back by a continuation call.
///
/// It stays valid until the scenario it belongs to is finalized; after that,
/// every use fails with `RechainError::ChainClosed`.
pub struct Chain<'a, V: Nullable> {
  dispatcher: &'a Dispatcher<V>,
  scenario: u64,
}

impl<'a, V: Nullable> Chain<'a, V> {
  /// Accesses the next step of the chain.
  pub fn step(&self, name: &str) -> RechainResult<StepInvoker<'a, V>> {
    self.dispatcher.step_in(self.scenario, name)
  }

  /// Single-entry form of `self.step(name)?.call(args)`.
  pub fn invoke(&self, name: &str, args: Args<V>) -> RechainResult<Outcome<'a, V>> {
    self.step(name)?.call(args)
  }

  /// Invokes the dispatcher directly, running the plan queued so far.
  pub fn call(self, input: V) -> RechainResult<V> {
    self.dispatcher.finalize(Some(self.scenario), None, input)
  }

  /// Whether the scenario of this chain is still being built.
  pub fn is_open(&self) -> bool {
    self.dispatcher.plan.lock().is_open(self.scenario)
  }

  pub fn dispatcher(&self) -> &'a Dispatcher<V> {
    self.dispatcher
  }
}

impl<V: Nullable> fmt::Debug for Chain<'_, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Chain")
      .field("scenario", &self.scenario)
      .field("open", &self.is_open())
      .finish()
  }
}
