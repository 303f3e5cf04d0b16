#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The GitHub Classroom check-run sink.
pub mod classroom;
/// The Moodle gradebook sink.
pub mod moodle;

pub use classroom::notify_classroom;
pub use moodle::update_moodle;
