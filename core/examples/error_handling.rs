// rechain/examples/error_handling.rs

use rechain::{RechainError, StepDescriptor};
use serde_json::{json, Value};
use tracing::{error, info};

// 1. A custom error raised from inside a step
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("A custom application error occurred: {0}")]
  CustomError(String),
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  let chain = rechain::every(vec![
    StepDescriptor::plain("parse", |x: Value| match x.as_str() {
      Some(s) => s
        .parse::<i64>()
        .map(|n| json!(n))
        .map_err(|_| ExampleAppError::CustomError(format!("'{}' is not an integer", s)).into()),
      None => Ok(Value::Null),
    }),
    StepDescriptor::factory("max", |bound: Value| {
      move |x: Value| Ok(if x.as_i64() <= bound.as_i64() { x } else { Value::Null })
    }),
  ])
  .expect("step names are unique");

  // Scenario 1: the step error reaches the caller untouched.
  info!("\nScenario 1: step returns a custom error");
  match chain.step("parse").and_then(|s| s.apply(json!("abc"))) {
    Err(RechainError::Step(source)) => match source.downcast_ref::<ExampleAppError>() {
      Some(app_err) => info!("Step failed as expected: {}", app_err),
      None => error!("Unexpected step error: {}", source),
    },
    other => error!("Unexpected outcome: {:?}", other),
  }
  // The failing scenario was reset before the step ran.
  assert!(chain.pending().is_empty());

  // Scenario 2: a stale chain handle is closed once its plan ran.
  info!("\nScenario 2: chaining on a finished scenario");
  let stale = chain.step("max").and_then(|s| s.configure(json!(10))).expect("max is a factory step");
  let value = chain.step("parse").and_then(|s| s.apply(json!("7"))).expect("7 parses");
  info!("max(10).parse(\"7\") = {}", value);
  match stale.step("parse") {
    Err(e @ RechainError::ChainClosed { .. }) => info!("Rejected as expected: {}", e),
    other => error!("Unexpected outcome: {:?}", other),
  }

  // Scenario 3: invoking the dispatcher with nothing queued.
  info!("\nScenario 3: direct invocation");
  match chain.call(json!("1")) {
    Err(e) => info!("Rejected as expected: {}", e),
    Ok(v) => error!("Unexpected value: {}", v),
  }

  info!("--- Error Handling Example Finished ---");
}
