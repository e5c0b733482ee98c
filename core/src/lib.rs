// src/lib.rs

//! Rechain: chainable dispatch over named transformation and validation steps.
//!
//! A set of named steps becomes a [`Dispatcher`]. Callers chain step names,
//! accumulating a plan, and the call that supplies the input value runs the
//! plan under one of three strategies:
//!  - [`every`]: pipeline; each result feeds the next step, null as soon as a
//!    result fails the predicate.
//!  - [`some`]: each step is tried against the original input; the first
//!    result passing the predicate wins.
//!  - [`map`]: plain left-to-right composition.
//!
//! Steps are either plain (`input -> output`) or factories, which take one
//! configuration value before the input (`config -> input -> output`).

pub mod builder;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod table;

// --- Re-exports for the Public API ---

pub use crate::builder::{every, every_with, map, some, some_with, DispatcherBuilder};

pub use crate::core::control::Args;
pub use crate::core::predicate::{is_non_null, Predicate};
pub use crate::core::step::{step_fn, FactoryFn, StepDescriptor, StepFn, StepKind};
pub use crate::core::value::Nullable;

pub use crate::dispatch::{Chain, Dispatcher, Outcome, QueuedInvocation, StepInvoker};
pub use crate::executor::Strategy;
pub use crate::table::{IntoStepTable, StepTable};

pub use crate::error::{RechainError, RechainResult};

/*
    Typical use:
    1. Describe the steps: `StepDescriptor::plain(name, f)` for one-argument
       steps, `StepDescriptor::factory(name, |config| move |input| ...)` for
       configurable ones.
    2. Build a dispatcher with `every`, `some` or `map` (or `Dispatcher::builder`).
    3. Chain: `chain.step("a")?.step("b")?` queues plain steps,
       `.configure(config)?` queues a configured factory step.
    4. Finish with `.apply(input)` (plain) or `.call_with(config, input)` (factory),
       which runs the plan and resets the dispatcher for the next scenario.
*/
