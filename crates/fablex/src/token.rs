use crate::{error::LexError, props::ToolProperties};
use serde::Serialize;
use std::fmt;

/// A single lexical unit of a Gerber or Excellon file.
///
/// Unmatched characters become [`TokenKind::Error`] tokens and blank space becomes
/// [`TokenKind::Whitespace`] / [`TokenKind::Newline`] tokens, so every byte of the input is
/// covered by exactly one token.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The raw slice of input consumed by the matching rule.
    pub lexeme: &'a str,
    /// The normalized payload; equal to `lexeme` for rules without a transform.
    pub value: &'a str,
    /// 1-based line.
    pub line: usize,
    /// 1-based character column.
    pub column: usize,
    /// 0-based byte offset of the lexeme.
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }

    /// The positioned error for an [`TokenKind::Error`] token.
    pub fn as_error(&self) -> Option<LexError> {
        if !self.is_error() {
            return None;
        }
        let ch = self.lexeme.chars().next()?;
        Some(LexError::UnmatchedCharacter {
            line: self.line,
            column: self.column,
            offset: self.offset,
            ch,
        })
    }

    /// Splits a [`TokenKind::DrillToolProps`] lexeme into its sub-fields.
    pub fn tool_properties(&self) -> Option<ToolProperties<'a>> {
        match self.kind {
            TokenKind::DrillToolProps => Some(ToolProperties::parse(self.lexeme)),
            _ => None,
        }
    }

    /// Byte offset one past the end of the lexeme.
    pub fn end(&self) -> usize {
        self.offset + self.lexeme.len()
    }
}

/// Every kind of token the lexer can produce.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// `T` tool code, e.g. `T01`.
    TCode,
    /// `G` preparatory code, e.g. `G04`.
    GCode,
    /// `M` miscellaneous code, e.g. `M48`.
    MCode,
    /// `D` aperture code, e.g. `D10`.
    DCode,
    Asterisk,
    Percent,
    /// Gerber `FS` format specification flags, e.g. `FSLA`.
    GerberFormat,
    /// Gerber `MOIN` / `MOMM`.
    GerberUnits,
    /// Gerber aperture definition head, e.g. `ADD10`.
    GerberToolDef,
    /// Excellon `;` comment running to the end of the line.
    DrillComment,
    /// Excellon `METRIC` / `INCH` header at the start of a line.
    DrillUnits,
    /// Excellon `,TZ` / `,LZ`.
    DrillZeroInclusion,
    /// Excellon coordinate format suffix, e.g. `,000.000`.
    DrillCoordFormat,
    /// Identifier followed by a comma: aperture template names, attribute names.
    GerberToolName,
    /// Excellon tool property groups, e.g. `C0.8F200S65`.
    DrillToolProps,
    Number,
    /// One of the axis or offset letters `X Y Z I J A`.
    Char,
    Whitespace,
    Newline,
    /// A single character no more specific rule claimed.
    Catchall,
    /// A single character no rule matched at all.
    Error,
}

impl TokenKind {
    pub const ALL: [TokenKind; 21] = [
        TokenKind::TCode,
        TokenKind::GCode,
        TokenKind::MCode,
        TokenKind::DCode,
        TokenKind::Asterisk,
        TokenKind::Percent,
        TokenKind::GerberFormat,
        TokenKind::GerberUnits,
        TokenKind::GerberToolDef,
        TokenKind::DrillComment,
        TokenKind::DrillUnits,
        TokenKind::DrillZeroInclusion,
        TokenKind::DrillCoordFormat,
        TokenKind::GerberToolName,
        TokenKind::DrillToolProps,
        TokenKind::Number,
        TokenKind::Char,
        TokenKind::Whitespace,
        TokenKind::Newline,
        TokenKind::Catchall,
        TokenKind::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::TCode => "T_CODE",
            TokenKind::GCode => "G_CODE",
            TokenKind::MCode => "M_CODE",
            TokenKind::DCode => "D_CODE",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Percent => "PERCENT",
            TokenKind::GerberFormat => "GERBER_FORMAT",
            TokenKind::GerberUnits => "GERBER_UNITS",
            TokenKind::GerberToolDef => "GERBER_TOOL_DEF",
            TokenKind::DrillComment => "DRILL_COMMENT",
            TokenKind::DrillUnits => "DRILL_UNITS",
            TokenKind::DrillZeroInclusion => "DRILL_ZERO_INCLUSION",
            TokenKind::DrillCoordFormat => "DRILL_COORD_FORMAT",
            TokenKind::GerberToolName => "GERBER_TOOL_NAME",
            TokenKind::DrillToolProps => "DRILL_TOOL_PROPS",
            TokenKind::Number => "NUMBER",
            TokenKind::Char => "CHAR",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Catchall => "CATCHALL",
            TokenKind::Error => "ERROR",
        }
    }

    /// Blank space a parser normally skips.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Newline)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
