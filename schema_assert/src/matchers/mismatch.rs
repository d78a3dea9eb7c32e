//! The first problem a column matcher runs into

use thiserror::Error;

use super::options::ColumnOption;

/// Why a column expectation did not hold
///
/// Only the first mismatch of an evaluation is ever reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Mismatch {
    #[error("{subject} does not have column {column}")]
    MissingColumn { subject: String, column: String },

    #[error("{column} column on table for {subject} does not match option {option}, found '{found}' but expected '{expected}'")]
    OptionMismatch {
        subject: String,
        column: String,
        option: ColumnOption,
        found: String,
        expected: String,
    },
}

impl Mismatch {
    /// The column the mismatch was found on
    pub fn column(&self) -> &str {
        match self {
            Mismatch::MissingColumn { column, .. } | Mismatch::OptionMismatch { column, .. } => column,
        }
    }
}
