// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use rechain::StepDescriptor;
use serde_json::{json, Value};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Test step failed: {0}")]
  Step(String),
}

// --- Value helpers ---

/// Numbers the way a dynamically typed caller would see them: whole floats
/// come back as integers so `json!(10)` compares equal.
pub fn number_value(n: f64) -> Value {
  if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
    json!(n as i64)
  } else {
    json!(n)
  }
}

// --- Common Step Creators ---

/// `x` if it is a number, null otherwise.
pub fn number() -> StepDescriptor<Value> {
  StepDescriptor::plain("number", |x: Value| Ok(if x.is_number() { x } else { Value::Null }))
}

/// `x * 2` for numbers, null otherwise.
pub fn doubled_number() -> StepDescriptor<Value> {
  StepDescriptor::plain("number", |x: Value| Ok(x.as_f64().map(|n| number_value(n * 2.0)).unwrap_or(Value::Null)))
}

/// `x + "!"` for strings, null otherwise.
pub fn exclaimed_string() -> StepDescriptor<Value> {
  StepDescriptor::plain("string", |x: Value| {
    Ok(x.as_str().map(|s| json!(format!("{}!", s))).unwrap_or(Value::Null))
  })
}

pub fn double() -> StepDescriptor<Value> {
  StepDescriptor::plain("double", |x: Value| Ok(number_value(x.as_f64().unwrap_or(f64::NAN) * 2.0)))
}

pub fn divide_by() -> StepDescriptor<Value> {
  StepDescriptor::factory("divide_by", |d: Value| {
    move |x: Value| Ok(number_value(x.as_f64().unwrap_or(f64::NAN) / d.as_f64().unwrap_or(f64::NAN)))
  })
}

/// Factory `bound -> x -> x if x >= bound else null`, registered as `name`.
pub fn at_least(name: &'static str) -> StepDescriptor<Value> {
  StepDescriptor::factory(name, |bound: Value| {
    move |x: Value| {
      Ok(match (x.as_f64(), bound.as_f64()) {
        (Some(n), Some(b)) if n >= b => x,
        _ => Value::Null,
      })
    }
  })
}

/// Factory `symbol -> input -> amount` for strings like `"$10"`.
pub fn currency() -> StepDescriptor<Value> {
  StepDescriptor::factory("currency", |symbol: Value| {
    move |input: Value| {
      let symbol = symbol.as_str().unwrap_or_default();
      Ok(
        input
          .as_str()
          .and_then(|s| s.strip_prefix(symbol))
          .and_then(|amount| amount.trim().parse::<f64>().ok())
          .map(number_value)
          .unwrap_or(Value::Null),
      )
    }
  })
}

/// Identity step that counts how many times it ran.
pub fn counting_step(name: &'static str, counter: Arc<AtomicUsize>) -> StepDescriptor<Value> {
  StepDescriptor::plain(name, move |x: Value| {
    counter.fetch_add(1, Ordering::SeqCst);
    tracing::debug!(target: "test_steps", step = name, "counted");
    Ok(x)
  })
}

/// Step that records the input it received, then returns `output`.
pub fn recording_step(name: &'static str, seen: Arc<parking_lot::Mutex<Vec<Value>>>, output: Value) -> StepDescriptor<Value> {
  StepDescriptor::plain(name, move |x: Value| {
    seen.lock().push(x);
    Ok(output.clone())
  })
}

pub fn failing_step(name: &'static str, error_message: &'static str) -> StepDescriptor<Value> {
  StepDescriptor::plain(name, move |_x: Value| {
    tracing::warn!(target: "test_steps", step = name, "failing with: '{}'", error_message);
    Err(anyhow::Error::new(TestError::Step(error_message.to_string())))
  })
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub fn counter() -> Arc<AtomicUsize> {
  Arc::new(AtomicUsize::new(0))
}

pub fn count(counter: &Arc<AtomicUsize>) -> usize {
  counter.load(Ordering::SeqCst)
}
