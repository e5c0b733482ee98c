// rechain/src/core/step.rs

//! Defines the structure for a single named step.

use std::fmt;
use std::sync::Arc;

/// A step function applied to the input value.
///
/// Errors are user errors and surface to the caller as `RechainError::Step`.
pub type StepFn<V> = Arc<dyn Fn(V) -> anyhow::Result<V> + Send + Sync + 'static>;

/// A configurable step: receives its configuration and yields the step function.
pub type FactoryFn<V> = Arc<dyn Fn(V) -> StepFn<V> + Send + Sync + 'static>;

/// Boxes a closure as a [`StepFn`], for the name/function form of a step table.
pub fn step_fn<V, F>(f: F) -> StepFn<V>
where
  F: Fn(V) -> anyhow::Result<V> + Send + Sync + 'static,
{
  Arc::new(f)
}

/// Calling convention of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
  /// Takes the input value only.
  Plain,
  /// Takes a configuration value first, then the input value.
  Factory,
}

impl fmt::Display for StepKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StepKind::Plain => f.write_str("plain"),
      StepKind::Factory => f.write_str("factory"),
    }
  }
}

#[derive(Clone)]
pub(crate) enum StepCallable<V> {
  Plain(StepFn<V>),
  Factory(FactoryFn<V>),
}

/// Definition of a step: its dispatch name and callable.
#[derive(Clone)]
pub struct StepDescriptor<V> {
  pub(crate) name: String,
  pub(crate) callable: StepCallable<V>,
}

impl<V: 'static> StepDescriptor<V> {
  /// A step that takes the input value and returns the transformed value.
  pub fn plain<S, F>(name: S, f: F) -> Self
  where
    S: Into<String>,
    F: Fn(V) -> anyhow::Result<V> + Send + Sync + 'static,
  {
    Self {
      name: name.into(),
      callable: StepCallable::Plain(Arc::new(f)),
    }
  }

  /// A curried step: `configure(config)` returns the function applied to the input.
  ///
  /// ```
  /// use rechain::StepDescriptor;
  /// use serde_json::Value;
  ///
  /// let min = StepDescriptor::<Value>::factory("min", |bound: Value| {
  ///   move |x: Value| {
  ///     Ok(match (x.as_f64(), bound.as_f64()) {
  ///       (Some(n), Some(b)) if n >= b => x,
  ///       _ => Value::Null,
  ///     })
  ///   }
  /// });
  /// assert_eq!(min.name(), "min");
  /// ```
  pub fn factory<S, F, G>(name: S, configure: F) -> Self
  where
    S: Into<String>,
    F: Fn(V) -> G + Send + Sync + 'static,
    G: Fn(V) -> anyhow::Result<V> + Send + Sync + 'static,
  {
    let factory: FactoryFn<V> = Arc::new(move |config: V| -> StepFn<V> { Arc::new(configure(config)) });
    Self {
      name: name.into(),
      callable: StepCallable::Factory(factory),
    }
  }

  /// Builds a plain step from an already boxed function.
  pub fn from_step_fn<S: Into<String>>(name: S, f: StepFn<V>) -> Self {
    Self {
      name: name.into(),
      callable: StepCallable::Plain(f),
    }
  }
}

impl<V> StepDescriptor<V> {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> StepKind {
    match self.callable {
      StepCallable::Plain(_) => StepKind::Plain,
      StepCallable::Factory(_) => StepKind::Factory,
    }
  }
}

// The callable doesn't implement Debug; show its kind instead.
impl<V> fmt::Debug for StepDescriptor<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StepDescriptor")
      .field("name", &self.name)
      .field("kind", &self.kind())
      .finish()
  }
}
