// rechain/src/table.rs

//! Normalizes caller-supplied steps into an ordered, name-indexed `StepTable`.

use std::collections::HashMap;

use tracing::{event, Level};

use crate::core::step::{StepCallable, StepDescriptor, StepFn};
use crate::error::{RechainError, RechainResult};

/// Ordered, immutable set of uniquely named steps.
///
/// Order is the caller's order: `every` and `some` try steps in this order and
/// it is the order reported by [`StepTable::names`].
#[derive(Clone, Debug)]
pub struct StepTable<V> {
  steps: Vec<StepDescriptor<V>>,
  index: HashMap<String, usize>,
}

impl<V> StepTable<V> {
  /// Builds a table from explicit descriptors.
  ///
  /// Fails with `RechainError::DuplicateStepName` if two descriptors share a name.
  pub fn from_descriptors<I>(descriptors: I) -> RechainResult<Self>
  where
    I: IntoIterator<Item = StepDescriptor<V>>,
  {
    let mut steps = Vec::new();
    let mut index = HashMap::new();
    for descriptor in descriptors {
      if index.contains_key(&descriptor.name) {
        event!(Level::ERROR, step_name = %descriptor.name, "Duplicate step name.");
        return Err(RechainError::DuplicateStepName {
          step_name: descriptor.name,
        });
      }
      index.insert(descriptor.name.clone(), steps.len());
      steps.push(descriptor);
    }
    event!(Level::TRACE, num_steps = steps.len(), "Step table built.");
    Ok(Self { steps, index })
  }

  /// Builds a table from `(name, function)` pairs. Every step is plain;
  /// factory steps need [`StepDescriptor::factory`].
  pub fn from_named<I, K>(fns: I) -> RechainResult<Self>
  where
    I: IntoIterator<Item = (K, StepFn<V>)>,
    K: Into<String>,
  {
    Self::from_descriptors(fns.into_iter().map(|(name, f)| StepDescriptor {
      name: name.into(),
      callable: StepCallable::Plain(f),
    }))
  }

  pub fn get(&self, name: &str) -> Option<&StepDescriptor<V>> {
    self.index.get(name).map(|&idx| &self.steps[idx])
  }

  pub fn contains(&self, name: &str) -> bool {
    self.index.contains_key(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.steps.iter().map(|s| s.name.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = &StepDescriptor<V>> {
    self.steps.iter()
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }
}

/// Conversion of the accepted step collection shapes into a [`StepTable`].
///
/// The name to function form takes a `Vec` of pairs rather than a map type,
/// since declaration order is the order `some` and `every` report in.
pub trait IntoStepTable<V> {
  fn into_step_table(self) -> RechainResult<StepTable<V>>;
}

impl<V> IntoStepTable<V> for StepTable<V> {
  fn into_step_table(self) -> RechainResult<StepTable<V>> {
    Ok(self)
  }
}

impl<V> IntoStepTable<V> for Vec<StepDescriptor<V>> {
  fn into_step_table(self) -> RechainResult<StepTable<V>> {
    StepTable::from_descriptors(self)
  }
}

impl<V, const N: usize> IntoStepTable<V> for [StepDescriptor<V>; N] {
  fn into_step_table(self) -> RechainResult<StepTable<V>> {
    StepTable::from_descriptors(self)
  }
}

impl<V, K: Into<String>> IntoStepTable<V> for Vec<(K, StepFn<V>)> {
  fn into_step_table(self) -> RechainResult<StepTable<V>> {
    StepTable::from_named(self)
  }
}
