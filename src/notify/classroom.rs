#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use anyhow::{Context, Result, bail, ensure};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::{config, constants::GITHUB_API, grade::Report};

/// Annotation attached to the updated check run.
#[derive(Serialize, Debug, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
struct CheckRunAnnotation {
    /// Path the annotation is anchored to.
    path:             String,
    /// First annotated line.
    start_line:       u32,
    /// Last annotated line.
    end_line:         u32,
    /// Severity level of the annotation.
    annotation_level: String,
    /// Annotation body.
    message:          String,
    /// Annotation title.
    title:            String,
}

/// Output block of the check-run update.
#[derive(Serialize, Debug, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
struct CheckRunOutput {
    /// Check-run title.
    title:       String,
    /// One-line points summary.
    summary:     String,
    /// Machine-readable points blob.
    text:        String,
    /// Annotations shown on the run.
    annotations: Vec<CheckRunAnnotation>,
}

/// Body of the check-run PATCH request.
#[derive(Serialize, Debug, TypedBuilder)]
struct CheckRunUpdate {
    /// The updated output block.
    output: CheckRunOutput,
}

/// Updates the Classroom check run with the report's combined totals.
///
/// Every failure here is logged and swallowed: the gradebook submission is
/// independent, so a broken check-run update must not cost the student
/// their score. Nothing is retried.
pub async fn notify_classroom(report: &Report) {
    if let Err(error) = try_update(report).await {
        tracing::error!("❌ Upload to Classroom failed: {error:#}");
    }
}

/// Locates the active check run and patches it with the points summary.
async fn try_update(report: &Report) -> Result<()> {
    if report.max() == 0.0 {
        tracing::error!("❌ Max points are zero, skipping the Classroom check run");
        return Ok(());
    }

    let token = std::env::var("GH_TOKEN").context("GH_TOKEN is missing")?;
    let nwo = std::env::var("GITHUB_REPOSITORY").context("GITHUB_REPOSITORY is missing")?;
    let Some((owner, repo)) = nwo.split_once('/') else {
        bail!("Invalid GITHUB_REPOSITORY format");
    };
    ensure!(!owner.is_empty() && !repo.is_empty(), "Owner or repository is missing");
    let run_id: u64 = std::env::var("GITHUB_RUN_ID")
        .unwrap_or_default()
        .parse()
        .context("Invalid GITHUB_RUN_ID")?;

    let client = config::http_client();
    let auth = format!("token {token}");
    let get_json = |url: String| {
        let client = client.clone();
        let auth = auth.clone();
        async move {
            client
                .get(url)
                .header("Authorization", auth)
                .header("Accept", "application/vnd.github.v3+json")
                .header("User-Agent", "pygrade")
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await
                .map_err(anyhow::Error::from)
        }
    };

    let workflow_run = get_json(format!("{GITHUB_API}/repos/{owner}/{repo}/actions/runs/{run_id}"))
        .await
        .context("Failed to fetch workflow run")?;
    let check_suite_id = workflow_run
        .get("check_suite_url")
        .and_then(Value::as_str)
        .and_then(|url| url.rsplit('/').next())
        .context("Error parsing workflow run response")?
        .to_string();

    let check_runs = get_json(format!(
        "{GITHUB_API}/repos/{owner}/{repo}/check-suites/{check_suite_id}/check-runs"
    ))
    .await
    .context("Failed to list check runs")?;
    let check_run_id = check_runs
        .get("check_runs")
        .and_then(|runs| runs.get(0))
        .and_then(|run| run.get("id"))
        .and_then(Value::as_u64)
        .context("No matching check run found")?;

    let text = format!("Points {}/{}", report.points(), report.max());
    let update = CheckRunUpdate::builder()
        .output(
            CheckRunOutput::builder()
                .title("Autograding")
                .summary(text.clone())
                .text(
                    serde_json::json!({
                        "totalPoints": report.points(),
                        "maxPoints": report.max(),
                    })
                    .to_string(),
                )
                .annotations(vec![
                    CheckRunAnnotation::builder()
                        .path(".github")
                        .start_line(1u32)
                        .end_line(1u32)
                        .annotation_level("notice")
                        .message(text.clone())
                        .title("Autograding complete")
                        .build(),
                ])
                .build(),
        )
        .build();

    client
        .patch(format!("{GITHUB_API}/repos/{owner}/{repo}/check-runs/{check_run_id}"))
        .header("Authorization", auth)
        .header("Accept", "application/vnd.github.v3+json")
        .header("User-Agent", "pygrade")
        .json(&update)
        .send()
        .await
        .context("Failed to update the check run")?
        .error_for_status()
        .context("Failed to update the check run")?;

    eprintln!("Check run updated: {text}");
    eprintln!("{}", "✅ Upload to Classroom successful.".green());
    Ok(())
}
