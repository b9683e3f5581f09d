// Copyright 2025 Diivanand Ramalingam
// Licensed under the Apache License, Version 2.0

//! Front end for the Cool language: source text in, [`Program`] out.
//!
//! ```
//! let prog = cool_frontend::parse_source("class Main { x : Int <- 42; };").unwrap();
//! assert_eq!(prog.classes[0].name, "Main");
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

pub use ast::*;
pub use error::{Error, LexError, LexErrorKind, SyntaxError};
pub use lexer::{lex, Lexer, Tok, Tokens};
pub use parser::{parse_class, parse_expr, parse_feature, parse_formal, parse_program};
pub use span::{LineIndex, Position, Span};

/// Lex and parse a complete source text.
pub fn parse_source(src: &str) -> Result<Program, Error> {
    let tokens = lex(src)?;
    Ok(parse_program(&tokens)?)
}

/// Lex and parse a single expression.
pub fn parse_expression(src: &str) -> Result<Expr, Error> {
    let tokens = lex(src)?;
    Ok(parse_expr(&tokens)?)
}
