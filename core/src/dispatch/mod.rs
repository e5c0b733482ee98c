// rechain/src/dispatch/mod.rs

//! Defines the `Dispatcher`, the pending plan it accumulates, and the invoker
//! handles through which callers chain step names.

pub mod definition;
pub mod execution;
pub mod invoker;
pub mod plan;

pub use definition::Dispatcher;
pub use invoker::{Chain, Outcome, StepInvoker};
pub use plan::QueuedInvocation;
