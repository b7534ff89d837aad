//! Gerber RS-274X and Excellon drill tokenizer.
//!
//! Both dialects share one rule table, so a single [`lex`] call handles either kind of file.
//! Every byte of the input ends up in exactly one [`Token`]; characters no rule accepts become
//! [`TokenKind::Error`] tokens and scanning carries on.

mod cursor;
mod error;
mod lexer;
mod props;
mod rules;
mod token;

pub use cursor::{Cursor, next_token};
pub use error::LexError;
pub use lexer::{Lexer, Strict, lex, tokenize};
pub use props::ToolProperties;
pub use rules::{Rule, Transform, rules};
pub use token::{Token, TokenKind};

#[cfg(test)]
mod testing;
