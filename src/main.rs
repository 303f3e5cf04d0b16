#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # pygrade
//!
//! Command-line entry point for the autograder. `pygrade grade` runs the
//! unit-test and lint graders, prints the grading overview, and submits the
//! report to Moodle and the Classroom check-run API; `pygrade test` and
//! `pygrade lint` run a single grader for local inspection.

use anyhow::Result;
use bpaf::*;
use dotenvy::dotenv;
use pygrade::{
    config,
    grade::{
        GradeResult, LintConfig, LintGrader, UnitTestGrader, build_report, load_catalog,
        load_lint_config, show_results,
    },
    notify,
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Run all graders and submit the report to both sinks.
    Grade {
        /// Print the report instead of submitting it.
        dry_run: bool,
    },
    /// Run the unit-test grader only.
    Test,
    /// Run the lint grader only.
    Lint,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    let dry_run = long("dry-run")
        .help("Print the report without submitting it")
        .switch();
    let grade = construct!(Cmd::Grade { dry_run })
        .to_options()
        .command("grade")
        .help("Grade the submission and submit the report");

    let test = pure(Cmd::Test)
        .to_options()
        .command("test")
        .help("Run the unit-test grader only");

    let lint = pure(Cmd::Lint)
        .to_options()
        .command("lint")
        .help("Run the lint grader only");

    let cmd = construct!([grade, test, lint]);

    cmd.to_options()
        .descr("Autograder for Python assignments")
        .run()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    config::ensure_initialized()?;

    match options() {
        Cmd::Test => {
            let result = run_tests().await?;
            show_results(&[result]);
        }
        Cmd::Lint => {
            let result = run_lint().await?;
            show_results(&[result]);
        }
        Cmd::Grade { dry_run } => {
            let results = vec![run_tests().await?, run_lint().await?];
            show_results(&results);

            let link = config::moodle_env().map(|env| env.external_link());
            let report = build_report(&results, link.as_deref());

            if report.max() == 0.0 {
                tracing::error!(
                    "Combined max points are zero; nothing to submit. Check the grading \
                     configuration."
                );
                return Ok(());
            }

            if dry_run {
                println!("{}", report.feedback());
                return Ok(());
            }

            notify::notify_classroom(&report).await;
            notify::update_moodle(&report).await?;
        }
    };

    Ok(())
}

/// Loads the case catalog and runs the unit-test grader.
async fn run_tests() -> Result<GradeResult> {
    let catalog = match config::case_catalog_path() {
        Some(path) => load_catalog(&path),
        None => {
            tracing::warn!("FILE_UNITTESTS is not set; running an empty case catalog");
            Vec::new()
        }
    };

    UnitTestGrader::builder()
        .catalog(catalog)
        .build()
        .grade_by_cases()
        .await
}

/// Loads the lint configuration and runs the lint grader.
async fn run_lint() -> Result<GradeResult> {
    let lint_config = match config::lint_config_path() {
        Some(path) => load_lint_config(&path),
        None => {
            tracing::warn!("FILE_LINT is not set; linting with the default configuration");
            LintConfig::default()
        }
    };

    LintGrader::builder()
        .config(lint_config)
        .build()
        .grade_by_lint()
        .await
}
