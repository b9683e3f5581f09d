// Copyright 2025 Diivanand Ramalingam
// Licensed under the Apache License, Version 2.0

use std::fmt;

use logos::{FilterResult, Logos};
use tracing::{debug, trace};

use crate::error::{LexError, LexErrorKind};
use crate::span::{LineIndex, Position, Span};

#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f\v]+")]
#[logos(skip r"--[^\n]*")]
#[logos(error = LexErrorKind)]
pub enum Tok {
    // Keywords (case-insensitive except true/false first letter must be lowercase)
    #[regex(r"(?i:class)")]
    KwClass,
    #[regex(r"(?i:inherits)")]
    KwInherits,
    #[regex(r"(?i:if)")]
    KwIf,
    #[regex(r"(?i:then)")]
    KwThen,
    #[regex(r"(?i:else)")]
    KwElse,
    #[regex(r"(?i:fi)")]
    KwFi,
    #[regex(r"(?i:while)")]
    KwWhile,
    #[regex(r"(?i:loop)")]
    KwLoop,
    #[regex(r"(?i:pool)")]
    KwPool,
    #[regex(r"(?i:let)")]
    KwLet,
    #[regex(r"(?i:in)")]
    KwIn,
    #[regex(r"(?i:case)")]
    KwCase,
    #[regex(r"(?i:of)")]
    KwOf,
    #[regex(r"(?i:esac)")]
    KwEsac,
    #[regex(r"(?i:new)")]
    KwNew,
    #[regex(r"(?i:isvoid)")]
    KwIsVoid,
    #[regex(r"(?i:not)")]
    KwNot,

    // true/false special casing rule (first char lowercase)
    #[regex(r"t[rR][uU][eE]", |_| true)]
    #[regex(r"f[aA][lL][sS][eE]", |_| false)]
    Bool(bool),

    // Symbols / operators
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    // `(*` opens a block comment, which is skipped rather than emitted
    #[token("(")]
    #[token("(*", block_comment)]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,

    #[token("<-")]
    Assign,
    #[token("=>")]
    Darrow,
    #[token("<=")]
    Le,
    #[token("<")]
    Lt,
    #[token("=")]
    Eq,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[token("~")]
    Tilde,

    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().map_err(|_| LexErrorKind::IntegerOutOfRange))]
    Int(i64),

    #[token("\"", string_literal)]
    Str(String),

    // Identifiers
    #[regex(r"[A-Z][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    TypeId(String),

    #[regex(r"[a-z][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    ObjId(String),
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            Tok::KwClass => "class",
            Tok::KwInherits => "inherits",
            Tok::KwIf => "if",
            Tok::KwThen => "then",
            Tok::KwElse => "else",
            Tok::KwFi => "fi",
            Tok::KwWhile => "while",
            Tok::KwLoop => "loop",
            Tok::KwPool => "pool",
            Tok::KwLet => "let",
            Tok::KwIn => "in",
            Tok::KwCase => "case",
            Tok::KwOf => "of",
            Tok::KwEsac => "esac",
            Tok::KwNew => "new",
            Tok::KwIsVoid => "isvoid",
            Tok::KwNot => "not",
            Tok::Bool(b) => return write!(f, "'{b}'"),
            Tok::LBrace => "{",
            Tok::RBrace => "}",
            Tok::LParen => "(",
            Tok::RParen => ")",
            Tok::Colon => ":",
            Tok::Semi => ";",
            Tok::Comma => ",",
            Tok::Dot => ".",
            Tok::At => "@",
            Tok::Assign => "<-",
            Tok::Darrow => "=>",
            Tok::Le => "<=",
            Tok::Lt => "<",
            Tok::Eq => "=",
            Tok::Plus => "+",
            Tok::Minus => "-",
            Tok::Star => "*",
            Tok::Slash => "/",
            Tok::Tilde => "~",
            Tok::Int(n) => return write!(f, "integer {n}"),
            Tok::Str(s) => return write!(f, "string {s:?}"),
            Tok::TypeId(s) => return write!(f, "type identifier `{s}`"),
            Tok::ObjId(s) => return write!(f, "identifier `{s}`"),
        };
        write!(f, "'{sym}'")
    }
}

/// Scan a string body after the opening quote, decoding escapes as we go.
fn string_literal(lex: &mut logos::Lexer<Tok>) -> Result<String, LexErrorKind> {
    let rest = lex.remainder();
    let mut out = String::new();
    let mut chars = rest.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(i + 1);
                return Ok(out);
            }
            '\0' => {
                lex.bump(i + 1);
                return Err(LexErrorKind::NullInString);
            }
            '\n' => {
                lex.bump(i);
                return Err(LexErrorKind::UnescapedNewlineInString);
            }
            '\\' => match chars.next() {
                Some((_, 'b')) => out.push('\u{0008}'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'n')) => out.push('\n'),
                Some((_, 'f')) => out.push('\u{000C}'),
                Some((j, '\0')) => {
                    lex.bump(j + 1);
                    return Err(LexErrorKind::NullInString);
                }
                // includes backslash-newline continuation
                Some((_, other)) => out.push(other),
                None => break,
            },
            c => out.push(c),
        }
    }

    lex.bump(rest.len());
    Err(LexErrorKind::UnterminatedString)
}

/// Block comments do not nest: the first `*)` closes the comment.
fn block_comment(lex: &mut logos::Lexer<Tok>) -> FilterResult<(), LexErrorKind> {
    match lex.remainder().find("*)") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexErrorKind::UnterminatedComment)
        }
    }
}

/// Pull-based token stream over one source text.
///
/// Yields `(token, span)` pairs and stops for good after the first error.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, Tok>,
    lines: LineIndex,
    failed: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            inner: Tok::lexer(src),
            lines: LineIndex::new(src),
            failed: false,
        }
    }

    fn error(&self, kind: LexErrorKind, span: Span) -> LexError {
        let (kind, span) = match kind {
            LexErrorKind::Unrecognized => {
                let c = self.inner.slice().chars().next().unwrap_or('\0');
                (
                    LexErrorKind::UnexpectedCharacter(c),
                    Span::new(span.start, span.start + c.len_utf8()),
                )
            }
            other => (other, span),
        };
        LexError {
            kind,
            span,
            position: self.lines.position(span.start),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<(Tok, Span), LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let res = self.inner.next()?;
        let span = Span::from(self.inner.span());
        match res {
            Ok(tok) => {
                trace!(token = %tok, start = span.start, end = span.end, "lexed token");
                Some(Ok((tok, span)))
            }
            Err(kind) => {
                self.failed = true;
                let err = self.error(kind, span);
                debug!(error = %err, "lexing failed");
                Some(Err(err))
            }
        }
    }
}

/// A fully lexed source: tokens with their spans, ready for the parser.
#[derive(Debug, Clone)]
pub struct Tokens {
    toks: Vec<Tok>,
    spans: Vec<Span>,
    lines: LineIndex,
}

impl Tokens {
    pub fn as_slice(&self) -> &[Tok] {
        &self.toks
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tok, Span)> {
        self.toks.iter().zip(self.spans.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.toks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toks.is_empty()
    }

    /// Source span of the token at `index`, or the empty span at the end of
    /// the source when `index` is past the last token.
    pub fn span_at(&self, index: usize) -> Span {
        self.spans.get(index).copied().unwrap_or_else(|| {
            let end = self.lines.source_len();
            Span::new(end, end)
        })
    }

    pub fn position(&self, offset: usize) -> Position {
        self.lines.position(offset)
    }
}

/// Lex Cool input into tokens.
pub fn lex(input: &str) -> Result<Tokens, LexError> {
    let mut lexer = Lexer::new(input);
    let mut toks = Vec::new();
    let mut spans = Vec::new();

    for res in lexer.by_ref() {
        let (tok, span) = res?;
        toks.push(tok);
        spans.push(span);
    }

    debug!(tokens = toks.len(), "lexed source");
    Ok(Tokens {
        toks,
        spans,
        lines: lexer.lines,
    })
}
