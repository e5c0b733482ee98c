// rechain/examples/basic_chain.rs

use rechain::{RechainError, StepDescriptor};
use serde_json::{json, Value};
use tracing::info;

fn number(n: f64) -> Value {
  if n.fract() == 0.0 {
    json!(n as i64)
  } else {
    json!(n)
  }
}

fn main() -> Result<(), RechainError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Chain Example ---");

  // 1. Describe the steps. `double` is plain, `divide_by` takes a divisor first.
  let chain = rechain::map(vec![
    StepDescriptor::plain("double", |x: Value| Ok(number(x.as_f64().unwrap_or(0.0) * 2.0))),
    StepDescriptor::factory("divide_by", |d: Value| {
      move |x: Value| Ok(number(x.as_f64().unwrap_or(0.0) / d.as_f64().unwrap_or(1.0)))
    }),
  ])?;

  // 2. Chain step names; the call carrying the input runs the plan.
  let result = chain.step("double")?.step("divide_by")?.call_with(json!(3), json!(6))?;
  info!("double.divide_by(3, 6) = {}", result);
  assert_eq!(result, json!(4));

  // 3. One argument to a factory step is configuration: the chain continues.
  let result = chain.step("divide_by")?.configure(json!(2))?.step("double")?.apply(json!(5))?;
  info!("divide_by(2).double(5) = {}", result);
  assert_eq!(result, json!(5));

  // 4. The dispatcher is ready for the next scenario.
  assert!(chain.pending().is_empty());
  info!("--- Basic Chain Example Finished ---");
  Ok(())
}
