//! AWS Lambda platform implementation

use super::error::{PlatformError, PlatformResult};
use super::{FunctionPlatform, VersionPage};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_lambda::error::{DisplayErrorContext, SdkError};
use aws_sdk_lambda::operation::delete_function::DeleteFunctionError;
use aws_sdk_lambda::operation::list_versions_by_function::ListVersionsByFunctionError;
use aws_sdk_lambda::Client;
use std::fmt;
use tracing::{debug, info, trace};

/// Overrides applied on top of the SDK's default configuration chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LambdaConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

/// Lambda-backed platform
pub struct LambdaPlatform {
    client: Client,
}

impl LambdaPlatform {
    /// Build a client from the environment plus the given overrides.
    ///
    /// Credentials are resolved lazily by the SDK; no request is made here.
    pub async fn new(config: &LambdaConfig) -> Self {
        info!("Initializing Lambda client");

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(ref region) = config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(ref profile) = config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(ref endpoint) = config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        debug!(
            "Lambda client region: {}",
            sdk_config
                .region()
                .map(|r| r.as_ref())
                .unwrap_or("<unset>")
        );

        Self::from_client(Client::new(&sdk_config))
    }

    /// Wrap an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FunctionPlatform for LambdaPlatform {
    async fn list_versions(
        &self,
        function_name: &str,
        marker: Option<&str>,
    ) -> PlatformResult<VersionPage> {
        trace!("ListVersionsByFunction {} marker={:?}", function_name, marker);

        let output = self
            .client
            .list_versions_by_function()
            .function_name(function_name)
            .set_marker(marker.map(str::to_string))
            .send()
            .await
            .map_err(|e| {
                classify(e, ListVersionsByFunctionError::is_resource_not_found_exception)
            })?;

        let versions = output
            .versions()
            .iter()
            .filter_map(|configuration| configuration.version().map(str::to_string))
            .collect();

        Ok(VersionPage {
            versions,
            next_marker: output.next_marker().map(str::to_string),
        })
    }

    async fn delete_version(&self, function_name: &str, qualifier: &str) -> PlatformResult<()> {
        trace!("DeleteFunction {}:{}", function_name, qualifier);

        self.client
            .delete_function()
            .function_name(function_name)
            .qualifier(qualifier)
            .send()
            .await
            .map_err(|e| classify(e, DeleteFunctionError::is_resource_not_found_exception))?;

        Ok(())
    }
}

/// Map an SDK failure onto [`PlatformError`], keeping the full error context.
fn classify<E, R>(err: SdkError<E, R>, is_not_found: fn(&E) -> bool) -> PlatformError
where
    E: std::error::Error + 'static,
    R: fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::ServiceError(service) if is_not_found(service.err()) => {
            PlatformError::NotFound(message)
        }
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            PlatformError::Connection(message)
        }
        _ => PlatformError::Service(message),
    }
}
