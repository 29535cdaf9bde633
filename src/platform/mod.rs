//! Function platform abstraction
//!
//! The pruner only needs two remote calls: list the published versions of a
//! function, one page at a time, and delete a single version. Both are behind
//! [`FunctionPlatform`] so the pipeline can run against Lambda or an in-memory
//! backend.

pub mod error;
pub mod lambda;
pub mod memory;

pub use error::{PlatformError, PlatformResult};
pub use lambda::{LambdaConfig, LambdaPlatform};
pub use memory::{MemoryPlatform, MemoryPlatformBuilder, PlatformCall};

use async_trait::async_trait;

/// Qualifier of the mutable, unpublished version of every function
pub const LATEST_QUALIFIER: &str = "$LATEST";

/// One page of a version listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPage {
    /// Version identifiers in the order the platform returned them
    pub versions: Vec<String>,
    /// Marker for the next page, `None` on the last page
    pub next_marker: Option<String>,
}

/// Remote operations used by the pruner
///
/// Implementations are shared between concurrent workers.
#[async_trait]
pub trait FunctionPlatform: Send + Sync {
    /// Fetch one page of the versions published for `function_name`
    async fn list_versions(
        &self,
        function_name: &str,
        marker: Option<&str>,
    ) -> PlatformResult<VersionPage>;

    /// Delete a single version of `function_name`
    async fn delete_version(&self, function_name: &str, qualifier: &str) -> PlatformResult<()>;
}
