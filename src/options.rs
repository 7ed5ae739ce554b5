//! `ExecutionOptions`: the per-call knobs an evaluation runs with.
//! Parse-and-validate-at-the-boundary style mirrored from
//! `boa_engine/src/builtins/options.rs` (non-positive inputs normalize to
//! documented defaults, rather than the executor branching on raw user
//! input at every use site), adapted to owned Rust types instead of
//! `JsValue`.

use crate::ast::Node;
use crate::context::ExpressionContext;
use crate::error::EvalError;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_MAX_STACK_DEPTH: usize = 50;

/// `(error, node, context) -> (value, handler_error)`, expressed as a Rust
/// `Result`: `Ok(value)` is the recovered-value path, `Err(e)` is the
/// handler-side error that replaces the original one.
pub type ErrorHandler =
    Arc<dyn Fn(&EvalError, &Node, &ExpressionContext) -> Result<Value, EvalError> + Send + Sync>;

#[derive(Clone)]
pub struct ExecutionOptions {
    timeout_ms: u64,
    max_stack_depth: usize,
    pub collect_metrics: bool,
    pub enable_debugging: bool,
    pub error_handler: Option<ErrorHandler>,
}

impl fmt::Debug for ExecutionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionOptions")
            .field("timeout_ms", &self.timeout_ms)
            .field("max_stack_depth", &self.max_stack_depth)
            .field("collect_metrics", &self.collect_metrics)
            .field("enable_debugging", &self.enable_debugging)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            collect_metrics: false,
            enable_debugging: false,
            error_handler: None,
        }
    }
}

impl ExecutionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero or negative normalizes to `DEFAULT_TIMEOUT_MS`.
    pub fn with_timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.timeout_ms = if timeout_ms > 0 {
            timeout_ms as u64
        } else {
            DEFAULT_TIMEOUT_MS
        };
        self
    }

    /// Zero or negative normalizes to `DEFAULT_MAX_STACK_DEPTH`.
    pub fn with_max_stack_depth(mut self, max_stack_depth: i64) -> Self {
        self.max_stack_depth = if max_stack_depth > 0 {
            max_stack_depth as usize
        } else {
            DEFAULT_MAX_STACK_DEPTH
        };
        self
    }

    pub fn with_collect_metrics(mut self, collect_metrics: bool) -> Self {
        self.collect_metrics = collect_metrics;
        self
    }

    pub fn with_enable_debugging(mut self, enable_debugging: bool) -> Self {
        self.enable_debugging = enable_debugging;
        self
    }

    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handler = Some(handler);
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn max_stack_depth(&self) -> usize {
        self.max_stack_depth
    }
}
