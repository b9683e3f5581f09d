// Copyright 2025 Diivanand Ramalingam
// Licensed under the Apache License, Version 2.0

//! Token-level grammar for Cool, built from chumsky combinators.
//!
//! Binding strength, loosest first:
//!
//! | level          | operators      | assoc |
//! |----------------|----------------|-------|
//! | assignment     | `<-`           | right |
//! | boolean not    | `not`          | right |
//! | comparison     | `<` `<=` `=`   | none  |
//! | additive       | `+` `-`        | left  |
//! | multiplicative | `*` `/`        | left  |
//! | isvoid         | `isvoid`       | right |
//! | complement     | `~`            | right |
//! | dispatch       | `@Type` `.`    | left  |
//!
//! Assignment and `not` take a whole expression as their operand, so they sit
//! with the atoms rather than in the Pratt table. Comparisons are handled in a
//! separate layer so a second comparison operator can be rejected outright.

use chumsky::error::RichPattern;
use chumsky::prelude::*;
use chumsky::{extra, pratt};
use tracing::debug;

use crate::ast::*;
use crate::error::SyntaxError;
use crate::lexer::{Tok, Tokens};

pub type ParseError<'src> = Rich<'src, Tok>;
pub type PExtra<'src> = extra::Err<ParseError<'src>>;

/// Parse a whole token buffer into a Program.
pub fn parse_program(tokens: &Tokens) -> Result<Program, SyntaxError> {
    let program = run(program_parser(), tokens)?;
    debug!(classes = program.classes.len(), "parsed program");
    Ok(program)
}

/// Parse exactly one `class ... ;` definition.
pub fn parse_class(tokens: &Tokens) -> Result<Class, SyntaxError> {
    run(class_parser(), tokens)
}

/// Parse exactly one `;`-terminated feature.
pub fn parse_feature(tokens: &Tokens) -> Result<Feature, SyntaxError> {
    run(feature_parser(), tokens)
}

pub fn parse_formal(tokens: &Tokens) -> Result<Formal, SyntaxError> {
    run(formal_parser(), tokens)
}

pub fn parse_expr(tokens: &Tokens) -> Result<Expr, SyntaxError> {
    run(expr_parser(), tokens)
}

fn run<'src, T>(
    parser: impl Parser<'src, &'src [Tok], T, PExtra<'src>>,
    tokens: &'src Tokens,
) -> Result<T, SyntaxError> {
    parser
        .then_ignore(end())
        .parse(tokens.as_slice())
        .into_result()
        .map_err(|errs| {
            let err = first_error(tokens, errs);
            debug!(error = %err, "parsing failed");
            err
        })
}

/// Map chumsky's token-index spans back onto source positions.
fn first_error(tokens: &Tokens, errs: Vec<ParseError<'_>>) -> SyntaxError {
    let (index, found, expected) = match errs.into_iter().next() {
        Some(e) => (
            e.span().start,
            e.found().cloned(),
            e.expected().filter_map(describe_pattern).collect(),
        ),
        None => (tokens.len(), None, Vec::new()),
    };
    let span = tokens.span_at(index);
    SyntaxError {
        found,
        span,
        position: tokens.position(span.start),
        expected,
    }
}

fn describe_pattern(pattern: &RichPattern<'_, Tok>) -> Option<String> {
    match pattern {
        RichPattern::Token(tok) => Some((**tok).to_string()),
        RichPattern::Label(label) => Some(label.to_string()),
        RichPattern::Identifier(ident) => Some(format!("'{ident}'")),
        RichPattern::Any => Some("any token".to_string()),
        RichPattern::EndOfInput => Some("end of input".to_string()),
        _ => None,
    }
}

pub fn program_parser<'src>() -> impl Parser<'src, &'src [Tok], Program, PExtra<'src>> {
    class_parser()
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .map(|classes| Program { classes })
}

fn class_parser<'src>() -> impl Parser<'src, &'src [Tok], Class, PExtra<'src>> {
    just(Tok::KwClass)
        .ignore_then(type_id())
        .then(just(Tok::KwInherits).ignore_then(type_id()).or_not())
        .then(
            feature_parser()
                .repeated()
                .collect::<Vec<_>>()
                .delimited_by(just(Tok::LBrace), just(Tok::RBrace)),
        )
        .then_ignore(just(Tok::Semi))
        .map(|((name, inherits), features)| Class {
            name,
            inherits,
            features,
        })
}

fn feature_parser<'src>() -> impl Parser<'src, &'src [Tok], Feature, PExtra<'src>> {
    let method = obj_id()
        .then(
            formal_parser()
                .separated_by(just(Tok::Comma))
                .collect::<Vec<_>>()
                .delimited_by(just(Tok::LParen), just(Tok::RParen)),
        )
        .then_ignore(just(Tok::Colon))
        .then(type_id())
        .then(expr_parser().delimited_by(just(Tok::LBrace), just(Tok::RBrace)))
        .map(|(((name, formals), ret_type), body)| {
            Feature::Method(Method {
                name,
                formals,
                ret_type,
                body,
            })
        });

    let attr = attr_def(expr_parser()).map(Feature::Attribute);

    method.or(attr).then_ignore(just(Tok::Semi))
}

/// `ID : TYPE [<- expr]`, shared by attributes and `let` bindings.
fn attr_def<'src>(
    expr: impl Parser<'src, &'src [Tok], Expr, PExtra<'src>> + Clone,
) -> impl Parser<'src, &'src [Tok], Attribute, PExtra<'src>> + Clone {
    obj_id()
        .then_ignore(just(Tok::Colon))
        .then(type_id())
        .then(just(Tok::Assign).ignore_then(expr).or_not())
        .map(|((name, ty), init)| Attribute { name, ty, init })
}

fn formal_parser<'src>() -> impl Parser<'src, &'src [Tok], Formal, PExtra<'src>> {
    obj_id()
        .then_ignore(just(Tok::Colon))
        .then(type_id())
        .map(|(name, ty)| Formal { name, ty })
}

fn type_id<'src>() -> impl Parser<'src, &'src [Tok], String, PExtra<'src>> + Clone {
    select! { Tok::TypeId(s) => s }
}

fn obj_id<'src>() -> impl Parser<'src, &'src [Tok], String, PExtra<'src>> + Clone {
    select! { Tok::ObjId(s) => s }
}

fn literal<'src>() -> impl Parser<'src, &'src [Tok], Expr, PExtra<'src>> + Clone {
    select! {
        Tok::Int(n) => Expr::Int(n),
        Tok::Str(s) => Expr::Str(s),
        Tok::Bool(b) => Expr::Bool(b),
    }
}

fn comparison_op<'src>() -> impl Parser<'src, &'src [Tok], BinOp, PExtra<'src>> + Clone {
    select! {
        Tok::Lt => BinOp::Lt,
        Tok::Le => BinOp::Le,
        Tok::Eq => BinOp::Eq,
    }
}

pub fn expr_parser<'src>() -> impl Parser<'src, &'src [Tok], Expr, PExtra<'src>> + Clone {
    recursive(|expr| {
        // args: ( [expr (, expr)*]? )
        let args = expr
            .clone()
            .separated_by(just(Tok::Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(Tok::LParen), just(Tok::RParen));

        // parentheses leave no trace in the tree
        let paren = expr
            .clone()
            .delimited_by(just(Tok::LParen), just(Tok::RParen));

        let block = expr
            .clone()
            .then_ignore(just(Tok::Semi))
            .repeated()
            .at_least(1)
            .collect::<Vec<_>>()
            .delimited_by(just(Tok::LBrace), just(Tok::RBrace))
            .map(Expr::Block);

        let if_ = just(Tok::KwIf)
            .ignore_then(expr.clone())
            .then_ignore(just(Tok::KwThen))
            .then(expr.clone())
            .then_ignore(just(Tok::KwElse))
            .then(expr.clone())
            .then_ignore(just(Tok::KwFi))
            .map(|((cond, then_), else_)| Expr::If {
                cond: Box::new(cond),
                then_: Box::new(then_),
                else_: Box::new(else_),
            });

        let while_ = just(Tok::KwWhile)
            .ignore_then(expr.clone())
            .then_ignore(just(Tok::KwLoop))
            .then(expr.clone())
            .then_ignore(just(Tok::KwPool))
            .map(|(cond, body)| Expr::While {
                cond: Box::new(cond),
                body: Box::new(body),
            });

        let let_ = just(Tok::KwLet)
            .ignore_then(
                attr_def(expr.clone())
                    .separated_by(just(Tok::Comma))
                    .at_least(1)
                    .collect::<Vec<_>>(),
            )
            .then_ignore(just(Tok::KwIn))
            .then(expr.clone())
            .map(|(bindings, body)| Expr::Let {
                bindings,
                body: Box::new(body),
            });

        let type_action = obj_id()
            .then_ignore(just(Tok::Colon))
            .then(type_id())
            .then_ignore(just(Tok::Darrow))
            .then(expr.clone())
            .then_ignore(just(Tok::Semi))
            .map(|((name, ty), expr)| TypeAction { name, ty, expr });

        let case_ = just(Tok::KwCase)
            .ignore_then(expr.clone())
            .then_ignore(just(Tok::KwOf))
            .then(type_action.repeated().at_least(1).collect::<Vec<_>>())
            .then_ignore(just(Tok::KwEsac))
            .map(|(e, arms)| Expr::Case {
                expr: Box::new(e),
                arms,
            });

        let new_ = just(Tok::KwNew).ignore_then(type_id()).map(Expr::New);

        // id(args) is always a call on self, never an Ident
        let call = obj_id()
            .then(args.clone())
            .map(|(name, args)| Expr::call(name, args));

        let id = obj_id().map(Expr::Ident);

        let atom = if_
            .or(while_)
            .or(let_)
            .or(case_)
            .or(block)
            .or(new_)
            .or(paren)
            .or(literal())
            .or(call)
            .or(id);

        // recv [@TYPE] . id(args)
        let dispatch_step = just(Tok::At)
            .ignore_then(type_id())
            .or_not()
            .then_ignore(just(Tok::Dot))
            .then(obj_id())
            .then(args)
            .map(|((static_ty, method), args)| (static_ty, method, args));

        let postfix = atom
            .then(dispatch_step.repeated().collect::<Vec<_>>())
            .map(|(base, steps)| {
                steps
                    .into_iter()
                    .fold(base, |recv, (static_type, method, args)| {
                        Expr::method_call(recv, static_type, method, args)
                    })
            });

        let assign = obj_id()
            .then_ignore(just(Tok::Assign))
            .then(expr.clone())
            .map(|(name, e)| Expr::assign(name, e));

        let not_ = just(Tok::KwNot)
            .ignore_then(expr.clone())
            .map(|e| Expr::unary(UnaryOp::Not, e));

        let operand = not_.or(assign).or(postfix);

        let arith = operand
            .pratt((
                pratt::prefix(4, just(Tok::Tilde), |_, rhs, _| {
                    Expr::unary(UnaryOp::Complement, rhs)
                }),
                pratt::prefix(3, just(Tok::KwIsVoid), |_, rhs, _| {
                    Expr::unary(UnaryOp::IsVoid, rhs)
                }),
                pratt::infix(pratt::left(2), just(Tok::Star), |lhs, _, rhs, _| {
                    Expr::binary(BinOp::Mul, lhs, rhs)
                }),
                pratt::infix(pratt::left(2), just(Tok::Slash), |lhs, _, rhs, _| {
                    Expr::binary(BinOp::Div, lhs, rhs)
                }),
                pratt::infix(pratt::left(1), just(Tok::Plus), |lhs, _, rhs, _| {
                    Expr::binary(BinOp::Add, lhs, rhs)
                }),
                pratt::infix(pratt::left(1), just(Tok::Minus), |lhs, _, rhs, _| {
                    Expr::binary(BinOp::Sub, lhs, rhs)
                }),
            ))
            .boxed();

        // comparisons do not chain: `a < b < c` is rejected at the second operator
        arith
            .clone()
            .then(comparison_op().then(arith).or_not())
            .map(|(lhs, rest)| match rest {
                Some((op, rhs)) => Expr::binary(op, lhs, rhs),
                None => lhs,
            })
            .then_ignore(comparison_op().not())
            .boxed()
    })
}
