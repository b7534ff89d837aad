use crate::{
    cursor::{Cursor, Memo, scan},
    error::LexError,
    token::Token,
};
use std::iter::FusedIterator;

/// Lazily tokenizes Gerber / Excellon text.
pub fn lex(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}

/// Tokenizes the whole input at once.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    lex(input).collect()
}

/// Pull-based token stream over one input.
///
/// The lexer only holds the input, a cursor and a memo of rules known to fail ahead of the
/// cursor, so dropping it mid-scan is free. A fresh scan needs a fresh `Lexer`.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    cursor: Cursor,
    memo: Memo,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: Cursor::default(),
            memo: Memo::default(),
        }
    }

    /// Position of the next token to be produced.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The unconsumed tail of the input.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.cursor.offset..]
    }

    /// Yields `Err` for every unmatched character instead of an error token.
    ///
    /// Scanning continues after an error; stopping is up to the caller.
    pub fn strict(self) -> Strict<'a> {
        Strict { inner: self }
    }

    /// Skips whitespace and newline tokens.
    pub fn significant(self) -> impl Iterator<Item = Token<'a>> + 'a {
        self.filter(|token| !token.kind.is_trivia())
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (token, cursor) = scan(self.input, self.cursor, &mut self.memo)?;
        self.cursor = cursor;
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // every token consumes at least one byte
        let remaining = self.input.len() - self.cursor.offset;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Lexer<'_> {}

/// See [`Lexer::strict`].
#[derive(Debug, Clone)]
pub struct Strict<'a> {
    inner: Lexer<'a>,
}

impl<'a> Iterator for Strict<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        Some(match token.as_error() {
            Some(err) => Err(err),
            None => Ok(token),
        })
    }
}

impl FusedIterator for Strict<'_> {}
