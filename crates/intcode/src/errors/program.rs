use std::num::ParseIntError;

use thiserror::Error;

/// Errors from parsing the comma-separated program source format.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ProgramError {
    /// A token between commas is not a base-10 integer.
    #[error("invalid integer '{token}' at position {index}")]
    InvalidInteger {
        index: usize,
        token: String,
        source: ParseIntError,
    },

    /// The source text contains no tokens at all.
    #[error("the program source is empty")]
    Empty,
}
