// rechain/src/builder.rs

//! Entry points (`every`, `map`, `some`) and the `DispatcherBuilder` they are
//! built on.

use std::sync::Arc;

use tracing::{event, instrument, Level};

use crate::core::predicate::{default_predicate, Predicate};
use crate::core::step::{StepDescriptor, StepFn};
use crate::core::value::Nullable;
use crate::dispatch::definition::Dispatcher;
use crate::error::RechainResult;
use crate::executor::Strategy;
use crate::table::{IntoStepTable, StepTable};

/// Dispatcher running every queued step in turn, feeding each result into the
/// next, and returning null as soon as a result is null.
pub fn every<V, S>(steps: S) -> RechainResult<Dispatcher<V>>
where
  V: Nullable,
  S: IntoStepTable<V>,
{
  build(Strategy::Every, steps, default_predicate())
}

/// Like [`every`], with a custom success predicate.
pub fn every_with<V, S, P>(steps: S, predicate: P) -> RechainResult<Dispatcher<V>>
where
  V: Nullable,
  S: IntoStepTable<V>,
  P: Fn(&V) -> bool + Send + Sync + 'static,
{
  build(Strategy::Every, steps, Arc::new(predicate))
}

/// Dispatcher composing the queued steps left to right.
pub fn map<V, S>(steps: S) -> RechainResult<Dispatcher<V>>
where
  V: Nullable,
  S: IntoStepTable<V>,
{
  build(Strategy::Map, steps, default_predicate())
}

/// Dispatcher trying each queued step against the same input and returning
/// the first non-null result.
pub fn some<V, S>(steps: S) -> RechainResult<Dispatcher<V>>
where
  V: Nullable,
  S: IntoStepTable<V>,
{
  build(Strategy::Some, steps, default_predicate())
}

/// Like [`some`], with a custom success predicate.
pub fn some_with<V, S, P>(steps: S, predicate: P) -> RechainResult<Dispatcher<V>>
where
  V: Nullable,
  S: IntoStepTable<V>,
  P: Fn(&V) -> bool + Send + Sync + 'static,
{
  build(Strategy::Some, steps, Arc::new(predicate))
}

fn build<V, S>(strategy: Strategy, steps: S, predicate: Predicate<V>) -> RechainResult<Dispatcher<V>>
where
  V: Nullable,
  S: IntoStepTable<V>,
{
  let table = steps.into_step_table()?;
  Ok(Dispatcher::new(strategy, table, predicate))
}

/// Fluent configuration of a [`Dispatcher`].
///
/// ```
/// use rechain::{Dispatcher, StepDescriptor, Strategy};
/// use serde_json::{json, Value};
///
/// let chain = Dispatcher::<Value>::builder(Strategy::Every)
///   .named("trimmed", rechain::step_fn(|x: Value| {
///     Ok(x.as_str().map(|s| json!(s.trim())).unwrap_or(Value::Null))
///   }))
///   .step(StepDescriptor::plain("non_empty", |x: Value| {
///     Ok(if x.as_str().map_or(false, |s| !s.is_empty()) { x } else { Value::Null })
///   }))
///   .build()?;
///
/// assert_eq!(chain.step("trimmed")?.step("non_empty")?.apply(json!("  hi "))?, json!("hi"));
/// assert_eq!(chain.step("trimmed")?.step("non_empty")?.apply(json!("   "))?, Value::Null);
/// # Ok::<(), rechain::RechainError>(())
/// ```
pub struct DispatcherBuilder<V: Nullable> {
  strategy: Strategy,
  steps: Vec<StepDescriptor<V>>,
  predicate: Option<Predicate<V>>,
}

impl<V: Nullable> DispatcherBuilder<V> {
  pub fn new(strategy: Strategy) -> Self {
    Self {
      strategy,
      steps: Vec::new(),
      predicate: None,
    }
  }

  pub fn step(mut self, descriptor: StepDescriptor<V>) -> Self {
    self.steps.push(descriptor);
    self
  }

  pub fn steps<I>(mut self, descriptors: I) -> Self
  where
    I: IntoIterator<Item = StepDescriptor<V>>,
  {
    self.steps.extend(descriptors);
    self
  }

  /// Adds a plain step from a boxed function.
  pub fn named<S: Into<String>>(mut self, name: S, f: StepFn<V>) -> Self {
    self.steps.push(StepDescriptor::from_step_fn(name, f));
    self
  }

  /// Success predicate for `every` and `some`. `map` ignores it.
  pub fn predicate<P>(mut self, predicate: P) -> Self
  where
    P: Fn(&V) -> bool + Send + Sync + 'static,
  {
    self.predicate = Some(Arc::new(predicate));
    self
  }

  /// Fails with `RechainError::DuplicateStepName` if two steps share a name.
  #[instrument(
    name = "DispatcherBuilder::build",
    skip_all,
    fields(strategy = %self.strategy, num_steps = self.steps.len()),
    err(Display)
  )]
  pub fn build(self) -> RechainResult<Dispatcher<V>> {
    if self.strategy == Strategy::Map && self.predicate.is_some() {
      event!(Level::DEBUG, "Predicate set on a 'map' dispatcher; it will not be consulted.");
    }
    let table = StepTable::from_descriptors(self.steps)?;
    let predicate = self.predicate.unwrap_or_else(default_predicate);
    Ok(Dispatcher::new(self.strategy, table, predicate))
  }
}
