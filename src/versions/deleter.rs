use crate::error::{PruneError, PruneResult};
use crate::platform::{FunctionPlatform, LATEST_QUALIFIER};
use tracing::{error, info, warn};

/// Result of deleting a batch of versions for one function
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Size of the batch that was requested
    pub total: usize,
    /// Identifiers that were deleted, in order
    pub deleted: Vec<String>,
    /// Identifiers that were rejected or failed, with the reason
    pub failures: Vec<PruneError>,
}

impl DeleteReport {
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.deleted.len() == self.total
    }
}

/// Reject identifiers that must never reach a delete call.
pub fn validate_identifier(function_name: &str, identifier: &str) -> PruneResult<()> {
    if identifier.trim().is_empty() || identifier == LATEST_QUALIFIER {
        return Err(PruneError::InvalidVersionIdentifier {
            function: function_name.to_string(),
            identifier: identifier.to_string(),
        });
    }
    Ok(())
}

/// Delete `identifiers` of `function_name` one at a time.
///
/// A rejected or failed identifier is logged and recorded; the rest of the
/// batch is still processed.
pub async fn delete_versions(
    platform: &dyn FunctionPlatform,
    function_name: &str,
    identifiers: &[String],
) -> DeleteReport {
    let mut report = DeleteReport {
        total: identifiers.len(),
        ..Default::default()
    };

    for identifier in identifiers {
        if let Err(e) = validate_identifier(function_name, identifier) {
            error!("{}", e);
            report.failures.push(e);
            continue;
        }

        match platform.delete_version(function_name, identifier).await {
            Ok(()) => {
                report.deleted.push(identifier.clone());
                info!(
                    "Deleted {} version {} ({}/{})",
                    function_name,
                    identifier,
                    report.deleted.len(),
                    report.total
                );
            }
            Err(e) => {
                let err = PruneError::PlatformDelete {
                    function: function_name.to_string(),
                    qualifier: identifier.clone(),
                    message: e.to_string(),
                };
                error!("{}", err);
                report.failures.push(err);
            }
        }
    }

    if !report.is_complete() {
        warn!(
            "{}: {}/{} version(s) deleted, {} failed",
            function_name,
            report.deleted_count(),
            report.total,
            report.failed_count()
        );
    }

    report
}
