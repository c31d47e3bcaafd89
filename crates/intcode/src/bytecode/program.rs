use std::str::FromStr;

use crate::{Word, errors::program::ProgramError};

/// The initial contents of memory: an ordered sequence of words loaded
/// starting at address 0. The machine mutates its own copy in place, so one
/// `Program` can seed any number of independent machines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The words, in address order.
    pub words: Vec<Word>,
}

impl Program {
    #[must_use]
    pub const fn new(words: Vec<Word>) -> Self {
        Self { words }
    }
}

impl From<Vec<Word>> for Program {
    fn from(words: Vec<Word>) -> Self {
        Self::new(words)
    }
}

impl FromStr for Program {
    type Err = ProgramError;

    /// Parses the flat source format: comma-separated base-10 integers,
    /// possibly signed, with no header or length prefix. Surrounding
    /// whitespace (the trailing newline of a puzzle input file, in practice)
    /// is tolerated around the whole text and around each token.
    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ProgramError::Empty);
        }
        source
            .split(',')
            .enumerate()
            .map(|(index, token)| {
                let token = token.trim();
                token
                    .parse()
                    .map_err(|source| ProgramError::InvalidInteger {
                        index,
                        token: token.to_owned(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}
