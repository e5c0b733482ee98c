// rechain/src/core/predicate.rs

//! Success predicates consulted by the `every` and `some` strategies.

use std::sync::Arc;

use super::value::Nullable;

/// Decides whether a step result counts as a success.
pub type Predicate<V> = Arc<dyn Fn(&V) -> bool + Send + Sync + 'static>;

/// Default predicate: any non-null value is a success.
pub fn is_non_null<V: Nullable>(value: &V) -> bool {
  !value.is_null()
}

pub(crate) fn default_predicate<V: Nullable>() -> Predicate<V> {
  Arc::new(is_non_null::<V>)
}
