#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{ffi::OsString, fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;
use itertools::Itertools;
use regex::Regex;
use serde::Deserialize;
use typed_builder::TypedBuilder;

use super::results::{Feedback, Grade, GradeResult, GraderCategory, LintDiagnostic, LintSeverity};
use crate::{
    config,
    constants::{BANNER, DEFAULT_LINT_MAX},
    process::run_collect,
    util::{find_files, pylint_path, round2},
};

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
/// Lint section of the grading configuration.
pub struct LintConfig {
    /// Explicit list of files to lint; when present and non-empty it wins
    /// over directory discovery.
    #[serde(default)]
    pub files:  Option<Vec<String>>,
    /// Regex patterns removing discovered files, matched against the start
    /// of the file name.
    #[serde(default)]
    pub ignore: Option<Vec<String>>,
    /// Maximum points the lint pass is worth.
    #[serde(default)]
    pub max:    Option<f64>,
}

/// Loads the lint configuration from a JSON file. Missing or unreadable
/// files log a diagnostic and yield the default configuration.
pub fn load_lint_config(path: &Path) -> LintConfig {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!("File {} not found: {error}", path.display());
            return LintConfig::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(error) => {
            tracing::warn!("File {} is not a valid lint config: {error}", path.display());
            LintConfig::default()
        }
    }
}

#[derive(Clone, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
/// Grades by running pylint once over the resolved file set and scaling the
/// tool's own 0-10 rating into points.
pub struct LintGrader {
    /// Lint configuration controlling file selection and the maximum.
    config: LintConfig,
    /// Display name for the grader in reports.
    #[builder(default = String::from("Linting"))]
    name:   String,
}

impl LintGrader {
    /// Runs the lint tool and returns the scored result. A tool that cannot
    /// run or produces unreadable output degrades to a zero-point result so
    /// the grading run stays alive.
    pub async fn grade_by_lint(self) -> Result<GradeResult> {
        let max = self.config.max.unwrap_or(DEFAULT_LINT_MAX);
        let files = resolve_files(&self.config, discover_python_files()?);

        let (diagnostics, score) = match run_tool(&files).await {
            Ok(output) => output,
            Err(error) => {
                tracing::error!("pylint did not produce a usable report: {error:#}");
                (Vec::new(), 0.0)
            }
        };

        let points = scale_score(score, max);
        print_summary(&self.config, &diagnostics, points, max);

        Ok(GradeResult::builder()
            .name(self.name)
            .category(GraderCategory::Lint)
            .grade(Grade::new(points, max))
            .feedback(Feedback::Lint(diagnostics))
            .build())
    }
}

/// Scales the tool's global 0-10 rating into points: the rating is clamped
/// into the unit interval before scaling, so negative ratings score zero and
/// nothing can exceed the maximum.
pub fn scale_score(score: f64, max: f64) -> f64 {
    round2((score / 10.0).clamp(0.0, 1.0) * max)
}

/// Resolves the set of files to lint: the configured explicit list when
/// present, otherwise the discovered files minus ignore-pattern matches,
/// with duplicates removed. Unparseable ignore patterns are logged and
/// skipped rather than aborting the pass.
pub fn resolve_files(config: &LintConfig, discovered: Vec<String>) -> Vec<String> {
    if let Some(files) = &config.files
        && !files.is_empty()
    {
        return files.clone();
    }

    let patterns: Vec<Regex> = config
        .ignore
        .iter()
        .flatten()
        .filter_map(|pattern| {
            // Anchor at the start of the name, like a prefix match.
            match Regex::new(&format!("^(?:{pattern})")) {
                Ok(regex) => Some(regex),
                Err(error) => {
                    tracing::warn!("Skipping unparseable ignore pattern {pattern:?}: {error}");
                    None
                }
            }
        })
        .collect();

    discovered
        .into_iter()
        .filter(|file| !patterns.iter().any(|regex| regex.is_match(file)))
        .unique()
        .collect()
}

/// Discovers Python source files in the working directory.
fn discover_python_files() -> Result<Vec<String>> {
    Ok(find_files("py", 0, Path::new("."))?
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .collect())
}

/// Raw message shape of pylint's `json2` output format.
#[derive(Debug, Deserialize)]
struct PylintMessage {
    /// Severity category ("error", "warning", "refactor", "convention", ...).
    #[serde(rename = "type")]
    severity: LintSeverity,
    /// The message text.
    message:  String,
    /// Path of the offending file.
    path:     String,
    /// Line number of the offending construct.
    line:     u32,
}

/// Statistics block of pylint's `json2` output format.
#[derive(Debug, Default, Deserialize)]
struct PylintStatistics {
    /// The tool's global 0-10 quality rating; negative for very bad code.
    #[serde(default)]
    score: f64,
}

/// Top-level shape of pylint's `json2` output format.
#[derive(Debug, Deserialize)]
struct PylintReport {
    /// All emitted messages.
    #[serde(default)]
    messages:   Vec<PylintMessage>,
    /// Run statistics, including the global rating.
    #[serde(default)]
    statistics: PylintStatistics,
}

/// Invokes pylint once across the file set and parses its JSON report.
async fn run_tool(files: &[String]) -> Result<(Vec<LintDiagnostic>, f64)> {
    let pylint = pylint_path()?;

    let mut args: Vec<OsString> = Vec::new();
    let rcfile = config::rcfile_path();
    if rcfile.exists() {
        args.push(OsString::from(format!("--rcfile={}", rcfile.display())));
    }
    args.push(OsString::from("--output-format=json2"));
    args.extend(files.iter().map(OsString::from));

    // The lint pass is the one invocation without a deadline.
    let collected = run_collect(&pylint, &args, None).await?;
    parse_output(&String::from_utf8_lossy(&collected.stdout))
}

/// Parses pylint's `json2` stdout into diagnostics and the global rating.
pub fn parse_output(raw: &str) -> Result<(Vec<LintDiagnostic>, f64)> {
    let report: PylintReport =
        serde_json::from_str(raw.trim()).context("pylint output is not in json2 format")?;

    let diagnostics = report
        .messages
        .into_iter()
        .map(|message| {
            LintDiagnostic::builder()
                .category(message.severity)
                .message(message.message)
                .path(message.path)
                .line(message.line)
                .build()
        })
        .collect();

    Ok((diagnostics, report.statistics.score))
}

/// Prints the lint banner, severity-colored diagnostics, and the points line.
fn print_summary(config: &LintConfig, diagnostics: &[LintDiagnostic], points: f64, max: f64) {
    eprintln!("\n");
    eprintln!("{}", BANNER.magenta());
    eprintln!("{}", format!("Linting Files {:?}", config.files).magenta().bold());
    eprintln!("{}", BANNER.magenta());

    for diagnostic in diagnostics {
        let line = format!(
            "{} in {} line {}: {}",
            diagnostic.category, diagnostic.path, diagnostic.line, diagnostic.message
        );
        let painted = match diagnostic.category {
            LintSeverity::Error => line.red(),
            LintSeverity::Warning => line.yellow(),
            LintSeverity::Refactor => line.blue(),
            LintSeverity::Convention => line.cyan(),
            LintSeverity::Other(_) => line.normal(),
        };
        eprintln!("{painted}");
    }

    eprintln!("{}", format!("🏆 Points: {points}/{max}").cyan().bold());
}
