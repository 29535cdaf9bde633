//! Application configuration
//!
//! Settings for one run, assembled from the command line.

use crate::error::{PruneError, PruneResult};
use crate::platform::LambdaConfig;
use crate::prune::{ExecutionStrategy, DEFAULT_CONCURRENCY};
use crate::versions::{RetentionPolicy, DEFAULT_KEEP};
use std::path::PathBuf;

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Path to the YAML file listing the functions
    pub config_path: PathBuf,
    /// Number of newest versions kept per function
    pub keep: usize,
    /// Maximum number of functions processed at once
    pub concurrency: usize,
    /// Logical keys to restrict the run to; empty means all
    pub functions: Vec<String>,
    /// AWS client overrides
    pub lambda: LambdaConfig,
}

impl AppConfig {
    /// Create a configuration for the given file with default settings
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            ..Self::default()
        }
    }

    pub fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_keep(mut self, keep: usize) -> Self {
        self.keep = keep;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_functions(mut self, functions: Vec<String>) -> Self {
        self.functions = functions;
        self
    }

    pub fn with_lambda(mut self, lambda: LambdaConfig) -> Self {
        self.lambda = lambda;
        self
    }

    /// Reject settings that would make the run meaningless
    pub fn validate(&self) -> PruneResult<()> {
        if self.keep == 0 {
            return Err(PruneError::invalid_argument(
                "keep",
                "at least one version must be retained",
            ));
        }
        if self.concurrency == 0 {
            return Err(PruneError::invalid_argument(
                "concurrency",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.keep)
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::from_concurrency(self.concurrency)
    }

    /// Get the log filter directive based on verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            2 => "trace,aws_config=info,aws_smithy_runtime=info,hyper=info",
            _ => "trace,hyper=debug,tower=debug",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            config_path: PathBuf::from("serverless.yml"),
            keep: DEFAULT_KEEP,
            concurrency: DEFAULT_CONCURRENCY,
            functions: Vec::new(),
            lambda: LambdaConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new("functions.yml");
        assert_eq!(config.keep, 5);
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.retention(), RetentionPolicy::new(5));
        assert_eq!(config.strategy(), ExecutionStrategy::Bounded { workers: 10 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(AppConfig::new("f.yml").with_keep(0).validate().is_err());
        assert!(AppConfig::new("f.yml").with_concurrency(0).validate().is_err());
    }

    #[test]
    fn test_single_worker_is_sequential() {
        let config = AppConfig::new("f.yml").with_concurrency(1);
        assert_eq!(config.strategy(), ExecutionStrategy::Sequential);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(AppConfig::default().log_level(), "info");
        assert_eq!(AppConfig::default().with_verbose(1).log_level(), "debug");
        assert!(AppConfig::default().with_verbose(5).log_level().starts_with("trace"));
    }
}
