//! Fatal error types for parsing the set configuration and resolving a selection.
//!
//! Recoverable problems (bad selection tokens, malformed conditional lines) are
//! not errors; they are reported through [`crate::interactive::Prompter::warn`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration contained no set headers at all.
    #[error("No sets parsed -- add some before running tolige")]
    NoSetsParsed,

    /// A content line appeared before the first set header.
    #[error("Malformed config: line {line_number} ('{line}') appears before any set header")]
    MalformedConfig { line_number: usize, line: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No sets selected, exiting")]
    Empty,
}
