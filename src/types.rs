/// Reference to a failing test parsed from the engine's short summary, e.g.
/// `FAILED test_calc.py::test_add - AssertionError: assert 4 == 5`.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct FailedTestRef {
    /// The `path::function` id of the failing test.
    pub test_id: String,
    /// The one-line failure message after the ` - ` separator, if any.
    pub message: String,
}

impl FailedTestRef {
    /// Returns the failing test's id.
    pub fn test_id(&self) -> &str {
        self.test_id.as_ref()
    }
}
