//! In-memory platform for testing
//!
//! Mirrors the Lambda behaviors the pruner depends on: `$LATEST` listed first,
//! published versions in ascending order, marker based paging and an error when
//! deleting a version that does not exist.

use super::error::{PlatformError, PlatformResult};
use super::{FunctionPlatform, VersionPage, LATEST_QUALIFIER};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// A call received by [`MemoryPlatform`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    List {
        function: String,
        marker: Option<String>,
    },
    Delete {
        function: String,
        qualifier: String,
    },
}

/// Builder for configured memory platforms
pub struct MemoryPlatformBuilder {
    functions: HashMap<String, Vec<String>>,
    page_size: usize,
    failing_lists: HashSet<String>,
    failing_deletes: HashSet<(String, String)>,
}

impl Default for MemoryPlatformBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPlatformBuilder {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
            page_size: 50,
            failing_lists: HashSet::new(),
            failing_deletes: HashSet::new(),
        }
    }

    /// Add a function with `$LATEST` and the given published versions
    pub fn with_function<I, S>(mut self, name: &str, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all = vec![LATEST_QUALIFIER.to_string()];
        all.extend(versions.into_iter().map(Into::into));
        self.functions.insert(name.to_string(), all);
        self
    }

    /// Add a function with versions `1..=count` published
    pub fn with_published(self, name: &str, count: u64) -> Self {
        self.with_function(name, (1..=count).map(|v| v.to_string()))
    }

    /// Add a function whose listing returns exactly `versions`, without `$LATEST`
    pub fn with_raw_listing<I, S>(mut self, name: &str, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.functions
            .insert(name.to_string(), versions.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Make every listing of `name` fail
    pub fn failing_list(mut self, name: &str) -> Self {
        self.failing_lists.insert(name.to_string());
        self
    }

    /// Make deleting `name:qualifier` fail
    pub fn failing_delete(mut self, name: &str, qualifier: &str) -> Self {
        self.failing_deletes
            .insert((name.to_string(), qualifier.to_string()));
        self
    }

    pub fn build(self) -> MemoryPlatform {
        MemoryPlatform {
            functions: Arc::new(Mutex::new(self.functions)),
            page_size: self.page_size,
            failing_lists: self.failing_lists,
            failing_deletes: self.failing_deletes,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// In-memory implementation of [`FunctionPlatform`]
pub struct MemoryPlatform {
    functions: Arc<Mutex<HashMap<String, Vec<String>>>>,
    page_size: usize,
    failing_lists: HashSet<String>,
    failing_deletes: HashSet<(String, String)>,
    calls: Arc<Mutex<Vec<PlatformCall>>>,
}

impl MemoryPlatform {
    pub fn builder() -> MemoryPlatformBuilder {
        MemoryPlatformBuilder::new()
    }

    /// Current versions of `name`, in listing order
    pub fn versions(&self, name: &str) -> Vec<String> {
        self.functions
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Qualifiers passed to delete calls for `name`, successful or not
    pub fn delete_calls(&self, name: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Delete {
                    function,
                    qualifier,
                } if function == name => Some(qualifier),
                _ => None,
            })
            .collect()
    }

    /// Total number of delete calls across all functions
    pub fn delete_call_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, PlatformCall::Delete { .. }))
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl FunctionPlatform for MemoryPlatform {
    async fn list_versions(
        &self,
        function_name: &str,
        marker: Option<&str>,
    ) -> PlatformResult<VersionPage> {
        self.record(PlatformCall::List {
            function: function_name.to_string(),
            marker: marker.map(str::to_string),
        });

        if self.failing_lists.contains(function_name) {
            return Err(PlatformError::service(format!(
                "TooManyRequestsException: listing {} failed",
                function_name
            )));
        }

        let functions = self.functions.lock().unwrap();
        let versions = functions
            .get(function_name)
            .ok_or_else(|| PlatformError::not_found(format!("Function not found: {}", function_name)))?;

        let start = match marker {
            Some(m) => m
                .parse::<usize>()
                .map_err(|_| PlatformError::service(format!("Invalid marker: {}", m)))?,
            None => 0,
        };
        let end = (start + self.page_size).min(versions.len());
        let page = versions.get(start..end).unwrap_or_default().to_vec();

        Ok(VersionPage {
            versions: page,
            next_marker: (end < versions.len()).then(|| end.to_string()),
        })
    }

    async fn delete_version(&self, function_name: &str, qualifier: &str) -> PlatformResult<()> {
        self.record(PlatformCall::Delete {
            function: function_name.to_string(),
            qualifier: qualifier.to_string(),
        });

        if self
            .failing_deletes
            .contains(&(function_name.to_string(), qualifier.to_string()))
        {
            return Err(PlatformError::service(format!(
                "ResourceConflictException: {}:{} is in use",
                function_name, qualifier
            )));
        }

        if qualifier == LATEST_QUALIFIER {
            return Err(PlatformError::service(
                "InvalidParameterValueException: $LATEST version cannot be deleted",
            ));
        }

        let mut functions = self.functions.lock().unwrap();
        let versions = functions
            .get_mut(function_name)
            .ok_or_else(|| PlatformError::not_found(format!("Function not found: {}", function_name)))?;

        let position = versions
            .iter()
            .position(|v| v == qualifier)
            .ok_or_else(|| {
                PlatformError::not_found(format!("Version not found: {}:{}", function_name, qualifier))
            })?;
        versions.remove(position);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_paging_returns_latest_first() {
        let platform = MemoryPlatform::builder()
            .with_published("svc-api", 3)
            .with_page_size(2)
            .build();

        let first = platform.list_versions("svc-api", None).await.unwrap();
        assert_eq!(first.versions, vec!["$LATEST", "1"]);
        assert_eq!(first.next_marker.as_deref(), Some("2"));

        let second = platform
            .list_versions("svc-api", first.next_marker.as_deref())
            .await
            .unwrap();
        assert_eq!(second.versions, vec!["2", "3"]);
        assert_eq!(second.next_marker, None);
    }

    #[tokio::test]
    async fn test_delete_removes_version() {
        let platform = MemoryPlatform::builder().with_published("svc-api", 3).build();

        platform.delete_version("svc-api", "2").await.unwrap();
        assert_eq!(platform.versions("svc-api"), vec!["$LATEST", "1", "3"]);

        let err = platform.delete_version("svc-api", "2").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(platform.delete_calls("svc-api"), vec!["2", "2"]);
    }

    #[tokio::test]
    async fn test_unknown_function_is_not_found() {
        let platform = MemoryPlatform::builder().build();
        let err = platform.list_versions("nope", None).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
