#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::{self, Display};

use serde::{Deserialize, Deserializer};
use tabled::Tabled;
use typed_builder::TypedBuilder;

#[derive(Clone, Copy, Debug, Default)]
/// A struct representing a grade
pub struct Grade {
    /// The actual grade received
    pub grade:  f64,
    /// The maximum grade possible
    pub out_of: f64,
}

impl Grade {
    /// Creates a new grade -
    /// * `grade` - The actual grade received
    /// * `out_of` - The maximum grade possible
    pub fn new(grade: f64, out_of: f64) -> Self {
        Self { grade, out_of }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}/{:.2}", self.grade, self.out_of)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which grading pass produced a result.
pub enum GraderCategory {
    /// The per-case unit-test pass.
    Tests,
    /// The lint pass.
    Lint,
}

impl GraderCategory {
    /// Returns the canonical tag used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            GraderCategory::Tests => "tests",
            GraderCategory::Lint => "lint",
        }
    }
}

impl Display for GraderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The classified result of running one case.
pub enum CaseOutcome {
    /// All selected tests passed.
    Passed,
    /// The test failed and was marked as an expected failure.
    PassedExpectedFailure,
    /// The test was skipped.
    Skipped,
    /// At least one selected test failed.
    Failed,
    /// The engine collected no test for the case's selector.
    NotCollected,
    /// The engine reported a status the grader does not recognize.
    UnknownError,
}

impl CaseOutcome {
    /// Whether this outcome awards the case's full points.
    pub fn awards_full(self) -> bool {
        matches!(self, CaseOutcome::Passed | CaseOutcome::PassedExpectedFailure)
    }

    /// Whether the engine finished the case without reporting a failure.
    pub fn is_clean_exit(self) -> bool {
        matches!(
            self,
            CaseOutcome::Passed | CaseOutcome::PassedExpectedFailure | CaseOutcome::Skipped
        )
    }
}

#[derive(Tabled, Clone, Debug, PartialEq)]
/// Scored outcome of a single case, one row of the test feedback table.
pub struct CaseResult {
    /// Name of the case as declared in the catalog.
    pub name:     String,
    /// One-line feedback shown to the student.
    pub feedback: String,
    /// Expected value extracted from an assertion diff, if any.
    pub expected: String,
    /// Actual value extracted from an assertion diff, if any.
    pub actual:   String,
    /// Points awarded for the case.
    pub points:   f64,
    /// Maximum points the case is worth.
    pub max:      f64,
    /// The classified outcome kind.
    #[tabled(skip)]
    pub outcome:  CaseOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Severity category of a pylint message.
pub enum LintSeverity {
    /// Likely bugs.
    Error,
    /// Python-specific problems.
    Warning,
    /// Refactoring suggestions.
    Refactor,
    /// Coding-standard violations.
    Convention,
    /// Any other category the tool emits (e.g. `fatal`, `info`).
    Other(String),
}

impl LintSeverity {
    /// Returns the canonical string representation used in reports.
    pub fn as_str(&self) -> &str {
        match self {
            LintSeverity::Error => "error",
            LintSeverity::Warning => "warning",
            LintSeverity::Refactor => "refactor",
            LintSeverity::Convention => "convention",
            LintSeverity::Other(value) => value.as_str(),
        }
    }
}

impl From<String> for LintSeverity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "error" => LintSeverity::Error,
            "warning" => LintSeverity::Warning,
            "refactor" => LintSeverity::Refactor,
            "convention" => LintSeverity::Convention,
            _ => LintSeverity::Other(value),
        }
    }
}

impl<'de> Deserialize<'de> for LintSeverity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(LintSeverity::from(value))
    }
}

impl Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Tabled, Clone, Debug, PartialEq, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
/// One message emitted by the lint tool, one row of the lint feedback table.
pub struct LintDiagnostic {
    /// Severity category of the message.
    pub category: LintSeverity,
    /// The message text.
    pub message:  String,
    /// Path of the file the message refers to.
    pub path:     String,
    /// Line number within the file.
    pub line:     u32,
}

#[derive(Clone, Debug)]
/// Ordered feedback entries carried by a grade result. The entry type fixes
/// the table's column set, so every row shares the same fields.
pub enum Feedback {
    /// Per-case results from the unit-test pass.
    Cases(Vec<CaseResult>),
    /// Diagnostics from the lint pass.
    Lint(Vec<LintDiagnostic>),
}

impl Feedback {
    /// Number of feedback entries.
    pub fn len(&self) -> usize {
        match self {
            Feedback::Cases(entries) => entries.len(),
            Feedback::Lint(entries) => entries.len(),
        }
    }

    /// Whether there are no feedback entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Tabled, Clone, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
/// A struct to store grading results and display them
pub struct GradeResult {
    #[tabled(rename = "Grader")]
    /// Display name of the grader.
    pub(crate) name:     String,
    #[tabled(rename = "Category")]
    /// Which grading pass produced this result.
    pub(crate) category: GraderCategory,
    #[tabled(rename = "Grade")]
    /// Points awarded and the maximum reachable.
    pub(crate) grade:    Grade,
    #[tabled(skip)]
    /// Ordered feedback entries backing the report table.
    pub(crate) feedback: Feedback,
}

impl GradeResult {
    /// Returns the display name of the grader.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the grader's category tag.
    pub fn category(&self) -> GraderCategory {
        self.category
    }

    /// Returns the numeric points value.
    pub fn points(&self) -> f64 {
        self.grade.grade
    }

    /// Returns the numeric maximum value.
    pub fn max(&self) -> f64 {
        self.grade.out_of
    }

    /// Returns the feedback entries.
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }
}
