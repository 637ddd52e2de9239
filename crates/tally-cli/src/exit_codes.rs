//! Process exit codes. Part of the public contract for CI callers.

use tally_core::errors::{ConfigError, FetchError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_STATUS_FAILED: i32 = 1; // --fail-on-failed and overall status is "failed"
pub const EXIT_CONFIG_ERROR: i32 = 2; // bad config, bad arguments, invalid query
pub const EXIT_INFRA_ERROR: i32 = 3; // run data could not be fetched

/// Exit code for an error that reached the top level. Typed library errors anywhere in the
/// chain decide; anything else is treated as a usage error.
pub fn for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<FetchError>() {
            return e.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return e.exit_code();
        }
    }
    EXIT_CONFIG_ERROR
}
