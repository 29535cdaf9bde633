//! Error handling utilities

use crate::error::{exit_codes, PruneError};
use tracing::error;

/// Handle fatal errors and exit with appropriate status code
///
/// A `PruneError` is shown with its user message and exit code; anything else
/// exits with the general error code. With `verbose >= 1` the cause chain is
/// printed as well.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);

    let exit_code = if let Some(prune_err) = error.downcast_ref::<PruneError>() {
        eprintln!("Error: {}", prune_err.user_message());
        prune_err.exit_code()
    } else {
        eprintln!("Error: {error}");
        exit_codes::GENERAL_ERROR
    };

    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    std::process::exit(exit_code)
}
