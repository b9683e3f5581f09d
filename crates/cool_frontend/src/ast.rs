// Copyright 2025 Diivanand Ramalingam
// Licensed under the Apache License, Version 2.0

//! Syntax tree produced by the parser.
//!
//! Every node owns its children and is never mutated after the parser builds
//! it. Literals are stored decoded; no node keeps raw lexemes.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub classes: Vec<Class>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub name: String,             // TYPE
    pub inherits: Option<String>, // TYPE, None means implicit Object
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feature {
    Method(Method),
    Attribute(Attribute),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String, // ID
    pub formals: Vec<Formal>,
    pub ret_type: String, // TYPE
    pub body: Expr,
}

/// An attribute declaration. `let` bindings share this shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String, // ID
    pub ty: String,   // TYPE
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formal {
    pub name: String, // ID
    pub ty: String,   // TYPE
}

/// One `name : Type => expr;` branch of a `case`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAction {
    pub name: String,
    pub ty: String,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    // variable reference
    Ident(String),
    Int(i64),
    Str(String),
    Bool(bool),

    Assign {
        name: String,
        expr: Box<Expr>,
    },

    // `name(args)`, dispatched on self
    FunctionCall {
        name: String,
        args: Vec<Expr>,
    },

    // `recv[@Type].method(args)`
    MethodCall {
        recv: Box<Expr>,
        static_type: Option<String>,
        method: String,
        args: Vec<Expr>,
    },

    If {
        cond: Box<Expr>,
        then_: Box<Expr>,
        else_: Box<Expr>,
    },

    While {
        cond: Box<Expr>,
        body: Box<Expr>,
    },

    // never empty; evaluates to its last element
    Block(Vec<Expr>),

    // bindings are scoped sequentially, left to right
    Let {
        bindings: Vec<Attribute>,
        body: Box<Expr>,
    },

    // never has zero arms
    Case {
        expr: Box<Expr>,
        arms: Vec<TypeAction>,
    },

    New(String),

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    // infix binary operations
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Int(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn assign(name: impl Into<String>, expr: Expr) -> Self {
        Expr::Assign {
            name: name.into(),
            expr: Box::new(expr),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::FunctionCall {
            name: name.into(),
            args,
        }
    }

    pub fn method_call(
        recv: Expr,
        static_type: Option<String>,
        method: impl Into<String>,
        args: Vec<Expr>,
    ) -> Self {
        Expr::MethodCall {
            recv: Box::new(recv),
            static_type,
            method: method.into(),
            args,
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOp {
    IsVoid,
    // ~expr
    Complement,
    Not,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Eq,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOp::IsVoid => "isvoid",
            UnaryOp::Complement => "~",
            UnaryOp::Not => "not",
        })
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Eq => "=",
        })
    }
}
