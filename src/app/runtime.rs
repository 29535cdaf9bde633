//! Runtime entry points
//!
//! Configuration is loaded and validated before the platform client exists, so
//! a fatal configuration error never results in a remote call.

use crate::app::config::AppConfig;
use crate::config::{load_functions, select_functions, FunctionDefinition};
use crate::error::PruneResult;
use crate::platform::{FunctionPlatform, LambdaPlatform};
use crate::prune::{Pruner, RunSummary};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Validate settings and load the functions selected for this run
pub async fn prepare(config: &AppConfig) -> PruneResult<Vec<FunctionDefinition>> {
    config.validate()?;
    let definitions = load_functions(&config.config_path).await?;
    Ok(select_functions(definitions, &config.functions))
}

/// Prune `definitions` against `platform` with the configured policy
pub async fn execute(
    config: &AppConfig,
    platform: Arc<dyn FunctionPlatform>,
    definitions: Vec<FunctionDefinition>,
) -> RunSummary {
    Pruner::new(platform)
        .with_policy(config.retention())
        .with_strategy(config.strategy())
        .run(definitions)
        .await
}

/// Full run against AWS Lambda
pub async fn run(config: &AppConfig) -> Result<RunSummary> {
    let definitions = prepare(config).await?;
    if definitions.is_empty() {
        info!("No functions to process in {}", config.config_path.display());
        return Ok(RunSummary::default());
    }

    let platform = Arc::new(LambdaPlatform::new(&config.lambda).await);
    Ok(execute(config, platform, definitions).await)
}
