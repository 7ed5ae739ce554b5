#![deny(
    unused_qualifications,
    clippy::all,
    unused_import_braces,
    unused_lifetimes,
    unreachable_pub,
    trivial_numeric_casts,
    missing_debug_implementations,
    deprecated_in_future,
    meta_variable_misuse,
    non_ascii_idents,
    rust_2018_compatibility,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style
)]
#![warn(clippy::perf, clippy::single_match_else, clippy::dbg_macro)]
#![allow(
    clippy::missing_inline_in_public_items,
    clippy::cognitive_complexity,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::as_conversions
)]

//! A sandboxed, JavaScript-like expression evaluator: a tree-walking AST
//! executor over a dynamically typed value model, bounded by a wall-clock
//! timeout and a maximum call-stack depth, meant to be embedded in a larger
//! host (e.g. a workflow automation engine) that supplies its own
//! `item`/`items`/variable bindings and host functions.
//!
//! ```
//! use flow_expr_eval::ast::{BinaryOp, Node};
//! use flow_expr_eval::builtins::default_registry;
//! use flow_expr_eval::context::ExpressionContext;
//! use flow_expr_eval::exec::Executor;
//! use flow_expr_eval::value::Value;
//!
//! let executor = Executor::new(default_registry());
//! let ctx = ExpressionContext::new(Value::Null, Value::array(vec![]));
//! let node = Node::Binary {
//!     op: BinaryOp::Add,
//!     left: Box::new(Node::NumberLiteral(1.0)),
//!     right: Box::new(Node::StringLiteral("2".to_string())),
//! };
//! let result = executor.execute(&node, &ctx);
//! assert_eq!(result.value, Some(Value::string("12")));
//! ```

pub mod ast;
pub mod builtins;
pub mod context;
pub mod error;
pub mod exec;
pub mod options;
pub mod property;
pub mod registry;
pub mod result;
pub mod stats;
pub mod value;

pub use ast::Node;
pub use context::ExpressionContext;
pub use error::{ErrorKind, EvalError};
pub use exec::Executor;
pub use options::ExecutionOptions;
pub use registry::{FunctionRegistry, SafeFunction};
pub use result::{EvaluationResult, ExecutionMetadata};
pub use value::Value;
