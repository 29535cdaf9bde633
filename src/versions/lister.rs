use super::sort_newest_first;
use crate::error::{PruneError, PruneResult};
use crate::platform::FunctionPlatform;
use std::collections::HashSet;
use tracing::{debug, error, trace};

/// Fetch every published version of `function_name`, newest first.
///
/// All pages are read before anything is returned. `$LATEST` and other
/// non-numeric qualifiers are dropped. A platform failure is logged and
/// returned as [`PruneError::PlatformList`]; callers treat it as "no versions".
pub async fn list_sorted_versions(
    platform: &dyn FunctionPlatform,
    function_name: &str,
) -> PruneResult<Vec<String>> {
    let mut identifiers = Vec::new();
    let mut marker: Option<String> = None;
    let mut seen_markers = HashSet::new();
    let mut pages = 0usize;

    loop {
        let page = match platform
            .list_versions(function_name, marker.as_deref())
            .await
        {
            Ok(page) => page,
            Err(e) => {
                error!("Failed to list versions for {}: {}", function_name, e);
                return Err(PruneError::PlatformList {
                    function: function_name.to_string(),
                    message: e.to_string(),
                });
            }
        };

        pages += 1;
        trace!(
            "Page {} of {} returned {} version(s)",
            pages,
            function_name,
            page.versions.len()
        );
        identifiers.extend(page.versions);

        match page.next_marker {
            Some(next) if !next.is_empty() => {
                if !seen_markers.insert(next.clone()) {
                    let err = PruneError::PlatformList {
                        function: function_name.to_string(),
                        message: format!("pagination marker '{}' returned twice", next),
                    };
                    error!("{}", err);
                    return Err(err);
                }
                marker = Some(next);
            }
            _ => break,
        }
    }

    let sorted = sort_newest_first(identifiers);
    debug!(
        "{} has {} published version(s) across {} page(s)",
        function_name,
        sorted.len(),
        pages
    );
    Ok(sorted)
}
