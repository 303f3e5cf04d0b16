#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};

use super::results::{Feedback, GradeResult};
use crate::util::round2;

/// The final normalized aggregation of all graders for one submission.
/// Immutable once built; building twice from the same results yields
/// byte-identical output.
#[derive(Clone, Debug)]
pub struct Report {
    /// Total points awarded, rounded once after summation.
    points:   f64,
    /// Total maximum points.
    max:      f64,
    /// One formatted markdown section per grader, in input order.
    sections: Vec<String>,
    /// Browsable link to the submission, appended as the final line.
    link:     Option<String>,
}

impl Report {
    /// Returns the total points awarded.
    pub fn points(&self) -> f64 {
        self.points
    }

    /// Returns the total maximum points.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Renders the full feedback markdown: every section in order, then the
    /// external link line if one was provided.
    pub fn feedback(&self) -> String {
        let mut out = self.sections.concat();
        if let Some(link) = &self.link {
            out.push_str(&format!("Link to repository: [{link}]({link})\n"));
        }
        out
    }
}

/// Merges the grader results into one report: one formatted section per
/// grader in input order, totals summed across all graders, and the total
/// awarded rounded to two decimals once after summation (never per grader).
pub fn build_report(results: &[GradeResult], external_link: Option<&str>) -> Report {
    let (points, max) = results
        .iter()
        .fold((0f64, 0f64), |acc, r| (acc.0 + r.points(), acc.1 + r.max()));

    Report {
        points:   round2(points),
        max,
        sections: results.iter().map(render_section).collect(),
        link:     external_link.map(str::to_string),
    }
}

/// Renders one grader's section: title, entry table, and summary line.
fn render_section(result: &GradeResult) -> String {
    let mut section = format!("## {}\n", result.name());

    let table = match result.feedback() {
        Feedback::Cases(entries) => markdown_table(entries),
        Feedback::Lint(entries) => markdown_table(entries),
    };
    section.push_str(&table);

    section.push_str(&format!(
        "\n**{:.2}/{:.2} Points ({:.2}%)**\n\n---\n",
        result.points(),
        result.max(),
        percentage(result.points(), result.max())
    ));
    section
}

/// Percentage of points earned, treating a zero maximum as 0% with a logged
/// warning instead of dividing by zero.
fn percentage(points: f64, max: f64) -> f64 {
    if max == 0.0 {
        tracing::warn!("grader has a zero point maximum; reporting 0%");
        0.0
    } else {
        points / max * 100.0
    }
}

/// Renders entries as a markdown table. Column headers come from the entry
/// type's field names; the entry type fixes the field set, so every row has
/// the same columns. An empty entry list renders as an empty string.
fn markdown_table<T: Tabled>(entries: &[T]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let headers: Vec<String> = T::headers().iter().map(|header| header.to_string()).collect();
    let mut table = format!("| {} |\n", headers.join(" | "));
    table.push_str(&format!("| {} |\n", vec!["---"; headers.len()].join(" | ")));

    for entry in entries {
        let row: Vec<String> = entry.fields().iter().map(|field| field.to_string()).collect();
        table.push_str(&format!("| {} |\n", row.join(" | ")));
    }

    table
}

/// Prints the grading overview table to the operator console.
pub fn show_results(results: &[GradeResult]) {
    let (grade, out_of) = results
        .iter()
        .fold((0f64, 0f64), |acc, r| (acc.0 + r.points(), acc.1 + r.max()));

    eprintln!(
        "{}",
        Table::new(results)
            .with(Panel::header("Grading Overview"))
            .with(Panel::footer(format!("Total: {grade:.2}/{out_of:.2}")))
            .with(Modify::new(Rows::new(1..)).with(Width::wrap(24).keep_words(true)))
            .with(
                Modify::new(Rows::first())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(
                Modify::new(Rows::last())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(Style::modern())
    );
}
