//! # lambda-prune
//!
//! Deletes old published versions of AWS Lambda functions, keeping the newest N
//! of each, so accounts stay below the code storage quota.
//!
//! ## Usage
//!
//! ```bash
//! lambda-prune --config serverless.yml [--keep 5] [--concurrency 10]
//! ```
//!
//! ## Modules
//!
//! - `app` - Run configuration, logging and runtime entry points
//! - `config` - Loading function definitions from the YAML configuration
//! - `error` - Error taxonomy shared by every stage
//! - `platform` - Trait-based abstraction over the function platform (Lambda, in-memory)
//! - `prune` - Per-function pipeline, execution strategies and run summary
//! - `versions` - Version listing, retention and deletion
pub mod app;
pub mod config;
pub mod error;
pub mod platform;
pub mod prune;
pub mod versions;

pub use config::FunctionDefinition;
pub use error::{PruneError, PruneResult};
pub use platform::{FunctionPlatform, LATEST_QUALIFIER};
pub use prune::{ExecutionStrategy, Pruner, RunSummary};
pub use versions::RetentionPolicy;
