// rechain/src/core/control.rs

//! Call shapes accepted by a step invoker.

/// Arguments passed to a step invoker.
///
/// Whether a call continues the chain or runs it is decided from this arity
/// together with the step kind:
/// - plain step, one argument: the argument is the input, the plan runs.
/// - factory step, one argument: the argument is configuration, the chain continues.
/// - factory step, two arguments: configuration then input, the plan runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Args<V> {
  One(V),
  Two(V, V),
}

impl<V> Args<V> {
  pub fn one(a1: V) -> Self {
    Args::One(a1)
  }

  pub fn two(a1: V, a2: V) -> Self {
    Args::Two(a1, a2)
  }

  pub fn arity(&self) -> usize {
    match self {
      Args::One(_) => 1,
      Args::Two(..) => 2,
    }
  }
}
