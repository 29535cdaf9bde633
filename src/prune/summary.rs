//! Per-function outcomes and the run summary built from them

use std::time::Duration;
use tracing::{info, warn};

/// What happened to a single function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionStatus {
    /// Not attempted, e.g. no deployed name
    Skipped { reason: String },
    /// Listing failed; treated as having nothing to delete
    ListFailed { error: String },
    /// Already at or below the retention threshold
    WithinRetention { versions: usize },
    /// Old versions were submitted for deletion
    Pruned {
        versions: usize,
        attempted: usize,
        deleted: usize,
        failures: Vec<String>,
    },
    /// The worker processing this function died
    Aborted { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionOutcome {
    pub key: String,
    pub name: String,
    pub status: FunctionStatus,
}

impl FunctionOutcome {
    pub fn new(key: impl Into<String>, name: impl Into<String>, status: FunctionStatus) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            status,
        }
    }

    pub fn deleted(&self) -> usize {
        match &self.status {
            FunctionStatus::Pruned { deleted, .. } => *deleted,
            _ => 0,
        }
    }

    pub fn failed_deletions(&self) -> usize {
        match &self.status {
            FunctionStatus::Pruned { failures, .. } => failures.len(),
            _ => 0,
        }
    }

    /// Whether anything went wrong for this function
    pub fn has_errors(&self) -> bool {
        match &self.status {
            FunctionStatus::ListFailed { .. } | FunctionStatus::Aborted { .. } => true,
            FunctionStatus::Pruned { failures, .. } => !failures.is_empty(),
            _ => false,
        }
    }
}

/// Aggregate of every function outcome in one run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub outcomes: Vec<FunctionOutcome>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn new(outcomes: Vec<FunctionOutcome>, elapsed: Duration) -> Self {
        Self { outcomes, elapsed }
    }

    pub fn total_functions(&self) -> usize {
        self.outcomes.len()
    }

    pub fn pruned_functions(&self) -> usize {
        self.count(|s| matches!(s, FunctionStatus::Pruned { .. }))
    }

    pub fn retained_functions(&self) -> usize {
        self.count(|s| matches!(s, FunctionStatus::WithinRetention { .. }))
    }

    pub fn skipped_functions(&self) -> usize {
        self.count(|s| matches!(s, FunctionStatus::Skipped { .. }))
    }

    pub fn list_failures(&self) -> usize {
        self.count(|s| matches!(s, FunctionStatus::ListFailed { .. }))
    }

    pub fn aborted_functions(&self) -> usize {
        self.count(|s| matches!(s, FunctionStatus::Aborted { .. }))
    }

    pub fn versions_deleted(&self) -> usize {
        self.outcomes.iter().map(FunctionOutcome::deleted).sum()
    }

    pub fn deletion_failures(&self) -> usize {
        self.outcomes.iter().map(FunctionOutcome::failed_deletions).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(FunctionOutcome::has_errors)
    }

    /// Emit the end-of-run report
    pub fn log(&self) {
        for outcome in self.outcomes.iter().filter(|o| o.has_errors()) {
            match &outcome.status {
                FunctionStatus::ListFailed { error } => {
                    warn!("{} ({}): listing failed: {}", outcome.key, outcome.name, error)
                }
                FunctionStatus::Aborted { error } => {
                    warn!("{} ({}): aborted: {}", outcome.key, outcome.name, error)
                }
                FunctionStatus::Pruned { failures, .. } => {
                    for failure in failures {
                        warn!("{} ({}): {}", outcome.key, outcome.name, failure);
                    }
                }
                _ => {}
            }
        }

        info!(
            "Processed {} function(s) in {:.1?}: {} pruned, {} within retention, {} skipped, {} listing failure(s), {} aborted",
            self.total_functions(),
            self.elapsed,
            self.pruned_functions(),
            self.retained_functions(),
            self.skipped_functions(),
            self.list_failures(),
            self.aborted_functions()
        );
        info!(
            "Deleted {} version(s), {} deletion failure(s)",
            self.versions_deleted(),
            self.deletion_failures()
        );
    }

    fn count(&self, predicate: impl Fn(&FunctionStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.status)).count()
    }
}
