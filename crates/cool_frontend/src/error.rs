// Copyright 2025 Diivanand Ramalingam
// Licensed under the Apache License, Version 2.0

//! Front-end errors. Both kinds abort the parse; there is no partial result.

use thiserror::Error;

use crate::lexer::Tok;
use crate::span::{Position, Span};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: lexical error: {kind}")]
pub struct LexError {
    #[source]
    pub kind: LexErrorKind,
    pub span: Span,
    pub position: Position,
}

/// The kind of lexical error. `Unrecognized` is what logos reports for
/// unmatched input; the lexer rewrites it into `UnexpectedCharacter`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
pub enum LexErrorKind {
    #[default]
    #[error("unrecognized input")]
    Unrecognized,

    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("string literal contains a null character")]
    NullInString,

    #[error("string literal contains an unescaped newline")]
    UnescapedNewlineInString,

    #[error("unterminated block comment")]
    UnterminatedComment,

    #[error("integer literal out of range")]
    IntegerOutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: {}", describe(.found.as_ref(), .expected))]
pub struct SyntaxError {
    /// `None` when the parser ran out of tokens.
    pub found: Option<Tok>,
    pub span: Span,
    pub position: Position,
    pub expected: Vec<String>,
}

impl SyntaxError {
    pub fn is_unexpected_eof(&self) -> bool {
        self.found.is_none()
    }
}

fn describe(found: Option<&Tok>, expected: &[String]) -> String {
    let mut msg = match found {
        Some(tok) => format!("syntax error at {tok}"),
        None => "syntax error: unexpected end of input".to_string(),
    };
    if !expected.is_empty() {
        msg.push_str(", expected ");
        msg.push_str(&expected.join(" or "));
    }
    msg
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl Error {
    pub fn position(&self) -> Position {
        match self {
            Error::Lex(e) => e.position,
            Error::Syntax(e) => e.position,
        }
    }
}
