//! Pruning pipeline
//!
//! - `orchestrator` - per-function list-then-delete unit and the [`Pruner`] entry point
//! - `executor` - sequential or bounded-pool scheduling of those units
//! - `summary` - per-function outcomes aggregated into a run summary

pub mod executor;
pub mod orchestrator;
pub mod summary;

pub use executor::{ExecutionStrategy, DEFAULT_CONCURRENCY};
pub use orchestrator::{prune_function, Pruner};
pub use summary::{FunctionOutcome, FunctionStatus, RunSummary};
