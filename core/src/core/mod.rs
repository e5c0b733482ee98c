pub mod control;
pub mod predicate;
pub mod step;
pub mod value;

// Re-export key types for easier access from other rechain modules (and lib.rs)
pub use control::Args;
pub use predicate::{is_non_null, Predicate};
pub use step::{step_fn, FactoryFn, StepDescriptor, StepFn, StepKind};
pub use value::Nullable;
