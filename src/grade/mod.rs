#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Case catalog loading.
pub mod catalog;
/// Engine exit status and captured-output classification.
pub mod classify;
/// Lint configuration, file resolution, and the lint grader.
pub mod lint;
/// Report building and console overview rendering.
pub mod report;
/// Shared grade result types.
pub mod results;

pub use catalog::{TestCase, load_catalog};
pub use classify::{EngineStatus, classify};
pub use lint::{LintConfig, LintGrader, load_lint_config};
pub use report::{Report, build_report, show_results};
pub use results::{
    CaseOutcome, CaseResult, Feedback, Grade, GradeResult, GraderCategory, LintDiagnostic,
    LintSeverity,
};
pub use tests::UnitTestGrader;
