//! Execution strategies for per-function work
//!
//! Every function is processed in its own task so a panic inside one unit is
//! reported as an outcome instead of taking the run down.

use super::orchestrator::prune_function;
use super::summary::{FunctionOutcome, FunctionStatus};
use crate::config::FunctionDefinition;
use crate::platform::FunctionPlatform;
use crate::versions::RetentionPolicy;
use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Default number of functions processed at the same time
pub const DEFAULT_CONCURRENCY: usize = 10;

/// How functions are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// One function at a time, in configuration order
    Sequential,
    /// Up to `workers` functions in flight
    Bounded { workers: usize },
}

impl Default for ExecutionStrategy {
    fn default() -> Self {
        Self::Bounded {
            workers: DEFAULT_CONCURRENCY,
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Bounded { workers } => write!(f, "{} workers", workers),
        }
    }
}

impl ExecutionStrategy {
    /// Sequential for a limit of 0 or 1, a bounded pool otherwise
    pub fn from_concurrency(concurrency: usize) -> Self {
        if concurrency <= 1 {
            Self::Sequential
        } else {
            Self::Bounded {
                workers: concurrency,
            }
        }
    }

    /// Process every definition and return the outcomes in input order.
    pub async fn process_all(
        &self,
        platform: Arc<dyn FunctionPlatform>,
        definitions: Vec<FunctionDefinition>,
        policy: RetentionPolicy,
    ) -> Vec<FunctionOutcome> {
        match *self {
            Self::Sequential => {
                let mut outcomes = Vec::with_capacity(definitions.len());
                for definition in definitions {
                    let unit = Unit::spawn(platform.clone(), definition, policy, None);
                    outcomes.push(unit.join().await);
                }
                outcomes
            }
            Self::Bounded { workers } => {
                debug!("Using parallelism level: {}", workers);
                let semaphore = Arc::new(Semaphore::new(workers.max(1)));

                let units: Vec<Unit> = definitions
                    .into_iter()
                    .map(|definition| {
                        Unit::spawn(platform.clone(), definition, policy, Some(semaphore.clone()))
                    })
                    .collect();

                join_all(units.into_iter().map(Unit::join)).await
            }
        }
    }
}

/// A spawned per-function task
struct Unit {
    key: String,
    name: String,
    handle: JoinHandle<FunctionOutcome>,
}

impl Unit {
    fn spawn(
        platform: Arc<dyn FunctionPlatform>,
        definition: FunctionDefinition,
        policy: RetentionPolicy,
        semaphore: Option<Arc<Semaphore>>,
    ) -> Self {
        let key = definition.key.clone();
        let name = definition.name.clone();

        let handle = tokio::spawn(async move {
            let _permit = match semaphore {
                Some(semaphore) => match semaphore.acquire_owned().await {
                    Ok(permit) => Some(permit),
                    Err(e) => {
                        return FunctionOutcome::new(
                            &definition.key,
                            &definition.name,
                            FunctionStatus::Aborted {
                                error: e.to_string(),
                            },
                        )
                    }
                },
                None => None,
            };
            prune_function(platform.as_ref(), &definition, policy).await
        });

        Self { key, name, handle }
    }

    async fn join(self) -> FunctionOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Processing {} ({}) aborted: {}", self.key, self.name, e);
                FunctionOutcome::new(
                    self.key,
                    self.name,
                    FunctionStatus::Aborted {
                        error: e.to_string(),
                    },
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryPlatform, PlatformResult, VersionPage};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn definitions(count: usize) -> Vec<FunctionDefinition> {
        (0..count)
            .map(|i| FunctionDefinition::new(format!("fn{i}"), format!("svc-fn{i}")))
            .collect()
    }

    #[test]
    fn test_from_concurrency() {
        assert_eq!(ExecutionStrategy::from_concurrency(0), ExecutionStrategy::Sequential);
        assert_eq!(ExecutionStrategy::from_concurrency(1), ExecutionStrategy::Sequential);
        assert_eq!(
            ExecutionStrategy::from_concurrency(4),
            ExecutionStrategy::Bounded { workers: 4 }
        );
        assert_eq!(ExecutionStrategy::default().to_string(), "10 workers");
    }

    #[tokio::test]
    async fn test_strategies_reach_same_state() {
        for strategy in [
            ExecutionStrategy::Sequential,
            ExecutionStrategy::Bounded { workers: 3 },
        ] {
            let mut builder = MemoryPlatform::builder();
            for i in 0..6 {
                builder = builder.with_published(&format!("svc-fn{i}"), 3 + i as u64 * 2);
            }
            let platform = Arc::new(builder.build());

            let outcomes = strategy
                .process_all(platform.clone(), definitions(6), RetentionPolicy::new(4))
                .await;

            let keys: Vec<_> = outcomes.iter().map(|o| o.key.clone()).collect();
            assert_eq!(keys, vec!["fn0", "fn1", "fn2", "fn3", "fn4", "fn5"]);
            for i in 0..6 {
                let remaining = platform.versions(&format!("svc-fn{i}"));
                // $LATEST plus at most four published versions
                assert!(remaining.len() <= 5, "{strategy}: svc-fn{i} kept {remaining:?}");
            }
        }
    }

    /// Counts concurrent list calls and panics for one function
    struct ProbePlatform {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl FunctionPlatform for ProbePlatform {
        async fn list_versions(
            &self,
            function_name: &str,
            _marker: Option<&str>,
        ) -> PlatformResult<VersionPage> {
            if function_name == "svc-fn2" {
                panic!("boom");
            }
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(VersionPage::default())
        }

        async fn delete_version(&self, _function_name: &str, _qualifier: &str) -> PlatformResult<()> {
            Ok(())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_bounded_pool_limits_concurrency_and_isolates_panics() {
        let platform = Arc::new(ProbePlatform {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });

        let outcomes = ExecutionStrategy::Bounded { workers: 2 }
            .process_all(platform.clone(), definitions(8), RetentionPolicy::default())
            .await;

        assert_eq!(outcomes.len(), 8);
        assert!(platform.peak.load(Ordering::SeqCst) <= 2);
        assert!(matches!(outcomes[2].status, FunctionStatus::Aborted { .. }));
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| matches!(o.status, FunctionStatus::WithinRetention { versions: 0 }))
                .count(),
            7
        );
    }
}
