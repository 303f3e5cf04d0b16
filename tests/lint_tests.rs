use std::path::PathBuf;

use pygrade::grade::{
    LintConfig, LintSeverity,
    lint::{load_lint_config, parse_output, resolve_files, scale_score},
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn strings(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|value| value.to_string()).collect()
}

#[test]
fn loads_the_lint_config_fixture() {
    let config = load_lint_config(&fixture("pylint.json"));

    assert_eq!(config.files, Some(strings(&["calculator.py", "shapes.py"])));
    assert_eq!(config.ignore, Some(strings(&["test_", "conftest\\.py"])));
    assert_eq!(config.max, Some(8.0));
}

#[test]
fn missing_lint_config_degrades_to_the_default() {
    let config = load_lint_config(&fixture("does_not_exist.json"));

    assert_eq!(config, LintConfig::default());
}

#[test]
fn explicit_file_list_wins_over_discovery() {
    let config = LintConfig {
        files: Some(strings(&["calculator.py"])),
        ignore: Some(strings(&["calc"])),
        max: None,
    };
    let resolved = resolve_files(&config, strings(&["other.py"]));

    assert_eq!(resolved, strings(&["calculator.py"]));
}

#[test]
fn empty_explicit_list_falls_back_to_discovery() {
    let config = LintConfig {
        files: Some(Vec::new()),
        ignore: None,
        max: None,
    };
    let resolved = resolve_files(&config, strings(&["calculator.py"]));

    assert_eq!(resolved, strings(&["calculator.py"]));
}

#[test]
fn ignore_patterns_match_at_the_start_of_the_name() {
    let config = LintConfig {
        files: None,
        ignore: Some(strings(&["test_"])),
        max: None,
    };
    let resolved = resolve_files(
        &config,
        strings(&["test_calculator.py", "calculator_test_helpers.py", "calculator.py"]),
    );

    assert_eq!(resolved, strings(&["calculator_test_helpers.py", "calculator.py"]));
}

#[test]
fn duplicate_discoveries_are_removed_in_order() {
    let config = LintConfig::default();
    let resolved = resolve_files(
        &config,
        strings(&["b.py", "a.py", "b.py", "a.py"]),
    );

    assert_eq!(resolved, strings(&["b.py", "a.py"]));
}

#[test]
fn unparseable_ignore_patterns_are_skipped() {
    let config = LintConfig {
        files: None,
        ignore: Some(strings(&["(unclosed", "test_"])),
        max: None,
    };
    let resolved = resolve_files(&config, strings(&["test_calculator.py", "calculator.py"]));

    assert_eq!(resolved, strings(&["calculator.py"]));
}

#[test]
fn parses_the_json2_report_fixture() {
    let raw = std::fs::read_to_string(fixture("pylint_output.json")).expect("read fixture");
    let (diagnostics, score) = parse_output(&raw).expect("parse json2 output");

    assert_eq!(score, 7.37);
    assert_eq!(diagnostics.len(), 4);
    assert_eq!(diagnostics[0].category, LintSeverity::Convention);
    assert_eq!(diagnostics[0].message, "Missing module docstring");
    assert_eq!(diagnostics[0].path, "calculator.py");
    assert_eq!(diagnostics[0].line, 1);
    assert_eq!(diagnostics[1].category, LintSeverity::Warning);
    assert_eq!(diagnostics[2].category, LintSeverity::Error);
    assert_eq!(diagnostics[3].category, LintSeverity::Other("info".to_string()));
}

#[test]
fn parse_output_rejects_non_json_output() {
    assert!(parse_output("Usage: pylint [options]").is_err());
}

#[test]
fn scaling_matches_the_tool_rating() {
    // A clean 8.0/10 run on the default maximum.
    assert_eq!(scale_score(8.0, 10.0), 8.0);
    // Ratings can go negative; they clamp to zero before scaling.
    assert_eq!(scale_score(-4.5, 10.0), 0.0);
    // Nothing scales past the configured maximum.
    assert_eq!(scale_score(12.0, 10.0), 10.0);
    // Points are rounded to two decimals.
    assert_eq!(scale_score(7.375, 10.0), 7.38);
    // Scaling respects a configured maximum.
    assert_eq!(scale_score(5.0, 8.0), 4.0);
}
