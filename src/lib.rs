//! # pygrade
//!
//! An autograder for Python assignments: runs a catalog of pytest cases and
//! a pylint pass over a student repository, aggregates both into one scored
//! feedback report, and submits the result to the Moodle gradebook and the
//! GitHub Classroom check-run API.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Runtime configuration loaded from the environment
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// For all things related to grading
pub mod grade;
/// For reporting finished results to external systems
pub mod notify;
/// For all parsers used
pub mod parsers;
/// Subprocess helpers that capture tool output
pub mod process;
/// Shared plain data types
pub mod types;
/// Utility functions for convenience
pub mod util;
