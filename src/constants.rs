#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Directory inside a student repository that holds grading configuration.
pub const AUTOGRADING_DIR: &str = ".github/autograding";

/// File name of the pylint rcfile within the autograding directory.
pub const PYLINT_RCFILE: &str = "pylintrc";

/// Marker emitted by the assignment test helpers right before an
/// expected/actual value pair.
pub const COMPARISON_MARKER: &str = "Comparing values:";

/// Summary keyword pytest prints when tests passed.
pub const SUMMARY_PASSED: &str = "passed";

/// Summary keyword pytest prints for expected failures.
pub const SUMMARY_XFAILED: &str = "xfailed";

/// Summary keyword pytest prints for skipped tests.
pub const SUMMARY_SKIPPED: &str = "skipped";

/// Maximum points for the lint grader when the lint config has no override.
pub const DEFAULT_LINT_MAX: f64 = 10.0;

/// Grace period in seconds added on top of a case's own engine timeout
/// before the pytest process is killed outright.
pub const ENGINE_TIMEOUT_GRACE_SECS: u64 = 10;

/// Default timeout in seconds for gradebook webservice requests.
pub const GRADEBOOK_TIMEOUT_SECS: u64 = 30;

/// Base URL of the GitHub REST API.
pub const GITHUB_API: &str = "https://api.github.com";

/// Width-80 rule used by console banners.
pub const BANNER: &str =
    "################################################################################";
