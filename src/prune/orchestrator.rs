//! Drives the list-then-delete pipeline over every configured function

use super::executor::ExecutionStrategy;
use super::summary::{FunctionOutcome, FunctionStatus, RunSummary};
use crate::config::FunctionDefinition;
use crate::error::PruneError;
use crate::platform::FunctionPlatform;
use crate::versions::{delete_versions, list_sorted_versions, RetentionPolicy};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Prune one function: list every version, then delete the ones past retention.
///
/// Never fails; every problem ends up in the returned outcome.
pub async fn prune_function(
    platform: &dyn FunctionPlatform,
    definition: &FunctionDefinition,
    policy: RetentionPolicy,
) -> FunctionOutcome {
    let outcome = |status| FunctionOutcome::new(&definition.key, &definition.name, status);

    let Some(name) = definition.deployed_name() else {
        let err = PruneError::MissingFunctionName {
            key: definition.key.clone(),
        };
        warn!("{}, skipping", err);
        return outcome(FunctionStatus::Skipped {
            reason: err.to_string(),
        });
    };

    let versions = match list_sorted_versions(platform, name).await {
        Ok(versions) => versions,
        Err(e) => {
            return outcome(FunctionStatus::ListFailed {
                error: e.to_string(),
            })
        }
    };

    let expired = policy.expired(&versions);
    if expired.is_empty() {
        info!(
            "{}: {} version(s), within retention of {}, nothing to delete",
            name,
            versions.len(),
            policy.keep
        );
        return outcome(FunctionStatus::WithinRetention {
            versions: versions.len(),
        });
    }

    info!(
        "{}: {} version(s), keeping {}, deleting the {} oldest",
        name,
        versions.len(),
        versions.len() - expired.len(),
        expired.len()
    );
    debug!("{}: deleting {:?}", name, expired);

    let report = delete_versions(platform, name, expired).await;

    outcome(FunctionStatus::Pruned {
        versions: versions.len(),
        attempted: report.total,
        deleted: report.deleted_count(),
        failures: report.failures.iter().map(ToString::to_string).collect(),
    })
}

/// Runs [`prune_function`] over a set of definitions
pub struct Pruner {
    platform: Arc<dyn FunctionPlatform>,
    policy: RetentionPolicy,
    strategy: ExecutionStrategy,
}

impl Pruner {
    pub fn new(platform: Arc<dyn FunctionPlatform>) -> Self {
        Self {
            platform,
            policy: RetentionPolicy::default(),
            strategy: ExecutionStrategy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetentionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Process every definition and log a summary.
    pub async fn run(&self, definitions: Vec<FunctionDefinition>) -> RunSummary {
        let started = Instant::now();
        info!(
            "Pruning {} function(s), keeping the newest {} version(s) of each ({})",
            definitions.len(),
            self.policy.keep,
            self.strategy
        );

        let outcomes = self
            .strategy
            .process_all(self.platform.clone(), definitions, self.policy)
            .await;

        let summary = RunSummary::new(outcomes, started.elapsed());
        summary.log();
        summary
    }
}
