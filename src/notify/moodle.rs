#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use lazy_static::lazy_static;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use serde::Serialize;
use typed_builder::TypedBuilder;

use crate::{config, constants::BANNER, grade::Report};

lazy_static! {
    /// Matches the `name` key of the webservice response envelope.
    static ref NAME_KEY_RE: Regex =
        Regex::new(r#"<KEY name="name">\s*<VALUE>\s*([^<]*?)\s*</VALUE>"#)
            .expect("valid regex");
    /// Matches the `message` key carrying plugin error details.
    static ref MESSAGE_KEY_RE: Regex =
        Regex::new(r#"<KEY name="message">\s*<VALUE>\s*([^<]*?)\s*</VALUE>"#)
            .expect("valid regex");
    /// Matches the top-level `MESSAGE` element of Moodle server errors.
    static ref MESSAGE_RE: Regex =
        Regex::new(r"<MESSAGE>\s*([^<]*?)\s*</MESSAGE>").expect("valid regex");
}

/// An enum to represent possible failures of a gradebook submission
#[derive(thiserror::Error, Debug)]
pub enum MoodleError {
    /// The response text carried no XML payload at all.
    #[error("No valid XML found in the gradebook response")]
    MissingXml,
    /// The webservice answered with an explicit error message.
    #[error("Upload to Moodle failed: {0}")]
    Rejected(String),
    /// The response was XML, but in no shape we recognise.
    #[error("Upload to Moodle failed with an unrecognised response:\n{0}")]
    Unrecognised(String),
}

/// Form payload of the gradebook webservice call.
#[derive(Serialize, Debug, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct GradePayload {
    /// Assignment the grade belongs to.
    assignment_name: String,
    /// Student receiving the grade.
    user_name:       String,
    /// Points awarded.
    points:          f64,
    /// Maximum points.
    max:             f64,
    /// Browsable link to the submission repository.
    externallink:    String,
    /// Percent-encoded markdown feedback.
    feedback:        String,
}

/// Submits the full report to the Moodle gradebook webservice.
///
/// This is the run's one fatal path: any failure here is returned as an
/// error so the process exits non-zero and the calling automation can flag
/// the run. The submission is attempted exactly once.
pub async fn update_moodle(report: &Report) -> Result<()> {
    let env = config::moodle_env().ok_or_else(|| {
        anyhow!(
            "TARGET_URL, TOKEN, FUNCTION, USERNAME, SERVER, and REPO must all be set to submit \
             grades"
        )
    })?;

    let payload = GradePayload::builder()
        .assignment_name(env.assignment())
        .user_name(env.username())
        .points(report.points())
        .max(report.max())
        .externallink(env.external_link())
        .feedback(utf8_percent_encode(&report.feedback(), NON_ALPHANUMERIC).to_string())
        .build();

    print_payload(&payload);

    let url = format!(
        "{}/webservice/rest/server.php/?wstoken={}&wsfunction={}",
        env.target_url(),
        env.token(),
        env.function()
    );

    let response = config::http_client()
        .post(&url)
        .form(&payload)
        .timeout(config::gradebook_timeout())
        .send()
        .await
        .context("Failed to reach the gradebook webservice")?;
    let body = response
        .text()
        .await
        .context("Failed to read the gradebook response")?;

    parse_response(&body)?;
    eprintln!("{}", "✅ Upload to Moodle successful.".green());
    Ok(())
}

/// Interprets the webservice response text. The response may embed the XML
/// payload inside a larger blob; success is the `name == success` key, and
/// everything else is an error with the best message we can extract.
pub fn parse_response(body: &str) -> Result<(), MoodleError> {
    let Some(start) = body.find("<?xml") else {
        return Err(MoodleError::MissingXml);
    };
    let xml = &body[start..];

    if let Some(capture) = NAME_KEY_RE.captures(xml)
        && &capture[1] == "success"
    {
        return Ok(());
    }

    if let Some(capture) = MESSAGE_KEY_RE.captures(xml) {
        return Err(MoodleError::Rejected(capture[1].replace("\\n", "\n")));
    }

    if let Some(capture) = MESSAGE_RE.captures(xml) {
        return Err(MoodleError::Rejected(capture[1].to_string()));
    }

    Err(MoodleError::Unrecognised(xml.to_string()))
}

/// Prints the payload banner before the upload.
fn print_payload(payload: &GradePayload) {
    eprintln!("\n");
    eprintln!("{}", BANNER.magenta());
    eprintln!("{}", "UPLOAD TO MOODLE".magenta().bold());
    eprintln!("{}", BANNER.magenta());
    eprintln!(
        "{}",
        format!("🏆 Total Points: \t{}/{}", payload.points, payload.max)
            .cyan()
            .bold()
    );
    eprintln!("{}", format!("👤 User : \t\t{}", payload.user_name).cyan());
    eprintln!("{}", format!("📝 Assignment : \t{}", payload.assignment_name).cyan());
    eprintln!("{}", format!("🔗 Link : \t\t{}", payload.externallink).cyan());
}
