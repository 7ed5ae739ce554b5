//! The AST shape a parser is expected to produce. The parser itself is an
//! external collaborator; this module defines the contract between it and
//! the executor.

/// A node in a parsed expression tree. Any node kind not listed here is,
/// by construction, impossible to construct. The executor's "unsupported
/// node type" error path exists for forward-compatibility with parsers
/// that might someday emit a kind this version doesn't know about, reached
/// only through `Node` values built outside this crate's own constructors.
#[derive(Debug, Clone)]
pub enum Node {
    StringLiteral(String),
    NumberLiteral(f64),
    BooleanLiteral(bool),
    NullLiteral,
    Identifier(String),
    /// `object.property`: the property name is fixed text, not itself a
    /// sub-expression.
    Member {
        object: Box<Node>,
        property: String,
    },
    /// `object[property]`: the property is evaluated at runtime.
    Index {
        object: Box<Node>,
        property: Box<Node>,
    },
    Call {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Unary {
        op: UnaryOp,
        argument: Box<Node>,
    },
    Conditional {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    /// `None` entries are array holes, normalized to `null` on evaluation.
    ArrayLiteral(Vec<Option<Node>>),
    ObjectLiteral(Vec<(PropertyKey, Node)>),
    /// `params => body`. Not a value: recognized only at the callback
    /// argument position of a higher-order array method.
    Arrow {
        params: Vec<String>,
        body: Box<Node>,
    },
    /// Expression-body wrapper some parsers emit around a top-level
    /// expression; transparent to evaluation.
    Program(Box<Node>),
}

#[derive(Debug, Clone)]
pub enum PropertyKey {
    Identifier(String),
    StringLiteral(String),
    NumberLiteral(f64),
    Computed(Box<Node>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    And,
    Or,
    NullishCoalesce,
    In,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    TypeOf,
    Void,
}
