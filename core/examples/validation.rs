// rechain/examples/validation.rs

use rechain::{RechainError, StepDescriptor};
use serde_json::{json, Value};
use tracing::info;

fn at_least(name: &str) -> StepDescriptor<Value> {
  StepDescriptor::factory(name, |bound: Value| {
    move |x: Value| {
      Ok(match (x.as_f64(), bound.as_f64()) {
        (Some(n), Some(b)) if n >= b => x,
        _ => Value::Null,
      })
    }
  })
}

fn currency() -> StepDescriptor<Value> {
  StepDescriptor::factory("currency", |symbol: Value| {
    move |input: Value| {
      let symbol = symbol.as_str().unwrap_or_default();
      Ok(
        input
          .as_str()
          .and_then(|s| s.strip_prefix(symbol))
          .and_then(|amount| amount.parse::<f64>().ok())
          .map(|n| json!(n))
          .unwrap_or(Value::Null),
      )
    }
  })
}

fn main() -> Result<(), RechainError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Validation Example ---");

  // `every`: each result feeds the next step; a null result fails the chain.
  let every = rechain::every(vec![
    StepDescriptor::plain("number", |x: Value| Ok(if x.is_number() { x } else { Value::Null })),
    at_least("min"),
  ])?;

  let ok = every.step("number")?.step("min")?.call_with(json!(5), json!(7))?;
  info!("every: number.min(5, 7) = {}", ok);
  let rejected = every.step("min")?.configure(json!(5))?.step("number")?.apply(json!("6"))?;
  info!("every: min(5).number(\"6\") = {}", rejected);

  // `some`: every step sees the original input; the first non-null result wins.
  let some = rechain::some(vec![currency(), at_least("gte")])?;

  for input in [json!("$10"), json!(45), json!(15)] {
    let result = some
      .step("currency")?
      .configure(json!("$"))?
      .step("gte")?
      .call_with(json!(30), input.clone())?;
    info!("some: currency('$').gte(30, {}) = {}", input, result);
  }

  info!("--- Validation Example Finished ---");
  Ok(())
}
