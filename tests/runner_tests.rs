use pygrade::grade::{Feedback, GraderCategory, UnitTestGrader};

#[tokio::test]
async fn empty_catalog_grades_to_zero_out_of_zero() {
    let result = UnitTestGrader::builder()
        .catalog(Vec::new())
        .build()
        .grade_by_cases()
        .await
        .expect("an empty catalog is not an error");

    assert_eq!(result.name(), "Unittests");
    assert_eq!(result.category(), GraderCategory::Tests);
    assert_eq!(result.points(), 0.0);
    assert_eq!(result.max(), 0.0);
    assert!(matches!(result.feedback(), Feedback::Cases(cases) if cases.is_empty()));
}
