use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unmatched character {ch:?} at line {line}, column {column}")]
    UnmatchedCharacter {
        line: usize,
        column: usize,
        offset: usize,
        ch: char,
    },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::UnmatchedCharacter { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            LexError::UnmatchedCharacter { column, .. } => *column,
        }
    }
}
