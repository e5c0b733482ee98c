// tests/error_handling_tests.rs
mod common;
use common::*;
use rechain::{RechainError, StepDescriptor};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Counts ERROR events seen while installed.
struct ErrorEventCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorEventCounter {
  fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
    if *event.metadata().level() == Level::ERROR {
      self.0.fetch_add(1, Ordering::SeqCst);
    }
  }
}

#[test]
fn test_step_error_propagates_unchanged() {
  setup_tracing();
  let after = counter();
  let chain = rechain::map(vec![
    double(),
    failing_step("explode", "I am a bad step!"),
    counting_step("after", after.clone()),
  ])
  .unwrap();

  let result = chain
    .step("double")
    .unwrap()
    .step("explode")
    .unwrap()
    .step("after")
    .unwrap()
    .apply(json!(1));

  match result {
    Err(err) => {
      assert!(err.is_step_failure());
      assert_eq!(err.to_string(), "Test step failed: I am a bad step!");
      match err {
        RechainError::Step(source) => assert_eq!(
          source.downcast_ref::<TestError>(),
          Some(&TestError::Step("I am a bad step!".to_string()))
        ),
        other => panic!("Expected RechainError::Step, got {:?}", other),
      }
    }
    Ok(v) => panic!("Expected an error, got {:?}", v),
  }
  assert_eq!(count(&after), 0);
}

#[test]
fn test_step_error_is_logged_once_at_error_level() {
  let errors = Arc::new(AtomicUsize::new(0));
  let subscriber = tracing_subscriber::registry().with(ErrorEventCounter(errors.clone()));

  tracing::subscriber::with_default(subscriber, || {
    let chain = rechain::map(vec![double(), failing_step("explode", "boom")]).unwrap();
    assert!(chain.step("double").unwrap().step("explode").unwrap().apply(json!(1)).is_err());

    // Direct invocation of a queued failing step.
    let _ = chain.step("explode").unwrap().step("double").unwrap();
    assert!(chain.call(json!(1)).unwrap_err().is_step_failure());
  });
  assert_eq!(errors.load(Ordering::SeqCst), 2);
}

#[test]
fn test_plan_is_reset_after_step_error() {
  setup_tracing();
  let chain = rechain::every(vec![number(), failing_step("explode", "boom")]).unwrap();

  assert!(chain.step("number").unwrap().step("explode").unwrap().apply(json!(1)).is_err());
  assert!(chain.pending().is_empty());

  // The next scenario starts clean.
  assert_eq!(chain.step("number").unwrap().apply(json!(2)).unwrap(), json!(2));
}

#[test]
fn test_every_failure_prevents_later_step_errors() {
  setup_tracing();
  let chain = rechain::every(vec![number(), failing_step("explode", "boom")]).unwrap();

  // number yields null for a string, so explode never runs.
  let result = chain.step("number").unwrap().step("explode").unwrap().apply(json!("s"));
  assert_eq!(result.unwrap(), Value::Null);
}

#[test]
fn test_some_match_prevents_later_step_errors() {
  setup_tracing();
  let chain = rechain::some(vec![doubled_number(), failing_step("explode", "boom")]).unwrap();

  assert_eq!(chain.step("number").unwrap().step("explode").unwrap().apply(json!(2)).unwrap(), json!(4));
  assert!(chain.step("number").unwrap().step("explode").unwrap().apply(json!("2")).is_err());
}

#[test]
fn test_factory_is_not_configured_when_never_reached() {
  setup_tracing();
  let configured = counter();
  let configured_in_factory = configured.clone();
  let chain = rechain::every(vec![
    number(),
    StepDescriptor::factory("tracked", move |bound: Value| {
      configured_in_factory.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
      move |x: Value| Ok(if x == bound { x } else { Value::Null })
    }),
  ])
  .unwrap();

  let result = chain.step("number").unwrap().step("tracked").unwrap().call_with(json!(1), json!("one"));
  assert_eq!(result.unwrap(), Value::Null);
  assert_eq!(count(&configured), 0);

  let result = chain.step("number").unwrap().step("tracked").unwrap().call_with(json!(1), json!(1));
  assert_eq!(result.unwrap(), json!(1));
  assert_eq!(count(&configured), 1);
}

#[test]
fn test_error_messages() {
  let closed = RechainError::ChainClosed { step_name: None };
  assert_eq!(closed.to_string(), "Chain is closed");

  let closed_at = RechainError::ChainClosed {
    step_name: Some("min".to_string()),
  };
  assert_eq!(closed_at.to_string(), "Chain is closed (at step 'min')");

  let missing = RechainError::MissingConfig {
    step_name: "min".to_string(),
  };
  assert!(missing.to_string().contains("min"));
  assert!(!missing.is_step_failure());

  let wrapped: RechainError = anyhow::anyhow!("plain failure").into();
  assert!(wrapped.is_step_failure());
  assert_eq!(wrapped.to_string(), "plain failure");
}
