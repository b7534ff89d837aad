use crate::{
    rules::{RULE_COUNT, rules},
    token::{Token, TokenKind},
};

/// A position in the input: byte offset plus the 1-based line and column it corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Cursor {
    /// Moves past `lexeme`, counting line breaks only when the rule declares them.
    fn advance(self, lexeme: &str, line_breaks: bool) -> Self {
        let offset = self.offset + lexeme.len();
        if line_breaks {
            if let Some(last) = lexeme.rfind('\n') {
                return Self {
                    offset,
                    line: self.line + lexeme.matches('\n').count(),
                    column: 1 + lexeme[last + 1..].chars().count(),
                };
            }
        }
        Self {
            offset,
            line: self.line,
            column: self.column + lexeme.chars().count(),
        }
    }

    fn at_line_start(&self, input: &str) -> bool {
        self.offset == 0 || matches!(input.as_bytes()[self.offset - 1], b'\n' | b'\r')
    }
}

/// Offsets below which each rule is already known to fail, carried between scan steps.
///
/// Only a hint: a default memo gives the same tokens, just without skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Memo {
    miss_until: [usize; RULE_COUNT],
}

impl Default for Memo {
    fn default() -> Self {
        Self {
            miss_until: [0; RULE_COUNT],
        }
    }
}

/// Scans the token starting at `cursor`.
///
/// Returns `None` once the cursor reaches the end of `input`. When no rule matches, a single
/// character [`TokenKind::Error`] token is produced so the scan always moves forward.
pub fn next_token(input: &str, cursor: Cursor) -> Option<(Token<'_>, Cursor)> {
    scan(input, cursor, &mut Memo::default())
}

/// [`next_token`] that reuses what earlier steps learned about failing rules.
pub(crate) fn scan<'a>(
    input: &'a str,
    cursor: Cursor,
    memo: &mut Memo,
) -> Option<(Token<'a>, Cursor)> {
    let rest = input.get(cursor.offset..)?;
    if rest.is_empty() {
        return None;
    }
    let at_line_start = cursor.at_line_start(input);

    for (idx, rule) in rules().iter().enumerate() {
        if cursor.offset < memo.miss_until[idx] {
            continue;
        }
        let Some(lexeme) = rule.matches(rest, at_line_start) else {
            memo.miss_until[idx] = cursor.offset + rule.miss_span(rest);
            continue;
        };
        let token = Token {
            kind: rule.kind,
            lexeme,
            value: rule.value(lexeme),
            line: cursor.line,
            column: cursor.column,
            offset: cursor.offset,
        };
        return Some((token, cursor.advance(lexeme, rule.line_breaks)));
    }

    let ch = rest.chars().next()?;
    let lexeme = &rest[..ch.len_utf8()];
    let token = Token {
        kind: TokenKind::Error,
        lexeme,
        value: lexeme,
        line: cursor.line,
        column: cursor.column,
        offset: cursor.offset,
    };
    Some((token, cursor.advance(lexeme, false)))
}
