// rechain/src/core/value.rs

//! The value model steps operate on.

use serde_json::Value;

/// A value type with a distinguished "null".
///
/// Strategies use null as the failure result (`every`, `some`) and the default
/// predicate treats any non-null value as success.
pub trait Nullable: Clone + Send + Sync + 'static {
  fn null() -> Self;

  fn is_null(&self) -> bool;
}

impl Nullable for Value {
  fn null() -> Self {
    Value::Null
  }

  fn is_null(&self) -> bool {
    Value::is_null(self)
  }
}

impl<T: Clone + Send + Sync + 'static> Nullable for Option<T> {
  fn null() -> Self {
    None
  }

  fn is_null(&self) -> bool {
    self.is_none()
  }
}
