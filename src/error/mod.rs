//! Issue and result vocabulary for validation failures.
//!
//! [`Issue`] is one recorded defect, [`Issues`] a non-empty ordered
//! collection of them, and [`ParseResult`]/[`ParseFailure`] the terminal
//! observable a parse call returns.

mod issue;
mod outcome;

pub use issue::{Issue, Issues, RefinementTag};
pub use outcome::{ParseFailure, ParseResult};
