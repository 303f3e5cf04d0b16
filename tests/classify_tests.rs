use pygrade::grade::{
    CaseOutcome, TestCase,
    classify::{EngineStatus, classify},
    tests::pytest_args,
};

fn case() -> TestCase {
    TestCase {
        name:     "t1".to_string(),
        function: "test_add".to_string(),
        timeout:  5,
        points:   2.0,
    }
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|line| line.to_string()).collect()
}

#[test]
fn ok_with_passed_summary_awards_full_points() {
    let captured = lines(&["", "1 passed in 0.03s"]);
    let result = classify(EngineStatus::Ok, &captured, &case());

    assert_eq!(result.outcome, CaseOutcome::Passed);
    assert_eq!(result.points, 2.0);
    assert_eq!(result.max, 2.0);
    assert_eq!(result.feedback, "Success");
}

#[test]
fn ok_with_xfailed_summary_awards_full_points() {
    let captured = lines(&["1 xfailed in 0.05s"]);
    let result = classify(EngineStatus::Ok, &captured, &case());

    assert_eq!(result.outcome, CaseOutcome::PassedExpectedFailure);
    assert_eq!(result.points, 2.0);
    assert_eq!(result.feedback, "Success: Fails as expected");
}

#[test]
fn ok_with_skipped_summary_awards_zero() {
    let captured = lines(&["1 skipped in 0.01s"]);
    let result = classify(EngineStatus::Ok, &captured, &case());

    assert_eq!(result.outcome, CaseOutcome::Skipped);
    assert_eq!(result.points, 0.0);
}

#[test]
fn ok_with_unrecognized_summary_is_an_unknown_error() {
    let captured = lines(&["no tests ran in 0.01s... wait, what?"]);
    let result = classify(EngineStatus::Ok, &captured, &case());

    assert_eq!(result.outcome, CaseOutcome::UnknownError);
    assert_eq!(result.points, 0.0);
}

#[test]
fn ok_with_empty_capture_does_not_panic() {
    let result = classify(EngineStatus::Ok, &[], &case());

    assert_eq!(result.outcome, CaseOutcome::UnknownError);
    assert_eq!(result.points, 0.0);
}

#[test]
fn failed_extracts_expected_and_actual_values() {
    let captured = lines(&[
        "test_calc.py F                                                           [100%]",
        "Comparing values:",
        "Expected: 5",
        "Actual: 4",
        "1 failed in 0.04s",
    ]);
    let result = classify(EngineStatus::TestsFailed, &captured, &case());

    assert_eq!(result.outcome, CaseOutcome::Failed);
    assert_eq!(result.points, 0.0);
    assert_eq!(result.feedback, "Assertion Error");
    assert_eq!(result.expected, "5");
    assert_eq!(result.actual, "4");
}

#[test]
fn failed_keeps_colons_inside_extracted_values() {
    let captured = lines(&["Comparing values:", "Expected: a:b", "Actual:   c:d  "]);
    let result = classify(EngineStatus::TestsFailed, &captured, &case());

    assert_eq!(result.expected, "a:b");
    assert_eq!(result.actual, "c:d");
}

#[test]
fn failed_with_marker_at_end_of_capture_degrades_to_empty_values() {
    let captured = lines(&["Comparing values:"]);
    let result = classify(EngineStatus::TestsFailed, &captured, &case());

    assert_eq!(result.outcome, CaseOutcome::Failed);
    assert_eq!(result.feedback, "Assertion Error");
    assert_eq!(result.expected, "");
    assert_eq!(result.actual, "");
}

#[test]
fn failed_without_marker_falls_back_to_short_summary_message() {
    let captured = lines(&[
        "............F",
        "FAILED test_calc.py::test_add - AssertionError: assert 4 == 5",
        "1 failed, 12 passed in 0.21s",
    ]);
    let result = classify(EngineStatus::TestsFailed, &captured, &case());

    assert_eq!(result.outcome, CaseOutcome::Failed);
    assert_eq!(result.feedback, "AssertionError: assert 4 == 5");
    assert_eq!(result.expected, "");
    assert_eq!(result.actual, "");
}

#[test]
fn failed_without_marker_or_summary_uses_last_nonempty_line() {
    let captured = lines(&["something went sideways", "", "   "]);
    let result = classify(EngineStatus::TestsFailed, &captured, &case());

    assert_eq!(result.feedback, "something went sideways");
}

#[test]
fn failed_with_empty_capture_keeps_the_default_feedback() {
    let result = classify(EngineStatus::TestsFailed, &[], &case());

    assert_eq!(result.outcome, CaseOutcome::Failed);
    assert_eq!(result.feedback, "Test failed, check GitHub Actions for details");
}

#[test]
fn no_tests_collected_awards_zero() {
    let captured = lines(&["no tests ran in 0.01s"]);
    let result = classify(EngineStatus::NoTestsCollected, &captured, &case());

    assert_eq!(result.outcome, CaseOutcome::NotCollected);
    assert_eq!(result.points, 0.0);
}

#[test]
fn unrecognized_exit_status_is_an_unknown_error() {
    let captured = lines(&["INTERNALERROR> boom"]);
    let result = classify(EngineStatus::Other(3), &captured, &case());

    assert_eq!(result.outcome, CaseOutcome::UnknownError);
    assert_eq!(result.points, 0.0);
    assert_eq!(result.feedback, "Unknown error, check GitHub Actions for details");
}

#[test]
fn engine_args_scope_the_selector_and_configure_the_timeout() {
    let args = pytest_args(&case());
    let args: Vec<String> = args
        .iter()
        .map(|arg| arg.to_string_lossy().to_string())
        .collect();

    assert_eq!(args, vec!["-k", "test_add", "--disable-warnings", "-q", "--timeout", "5"]);
}
