//! `EvaluationResult`: the envelope `Execute` returns, either a normalized
//! value plus metadata, or an error category plus message. `Serialize` is
//! derived so a host can hand the envelope straight to a transport layer,
//! grounded on `boa`'s own direct `serde`/`serde_json` dependency.

use crate::error::{ErrorKind, EvalError};
use crate::value::Value;
use serde::Serialize;
use std::collections::HashSet;

/// Per-call timing, complexity, and extraction metadata. Always
/// populated with at least `execution_time_us`; the rest are only filled
/// in when `ExecutionOptions::collect_metrics` is set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionMetadata {
    pub execution_time_us: u128,
    pub complexity: Option<f64>,
    pub accessed_variables: Option<Vec<String>>,
    pub called_functions: Option<Vec<String>>,
}

/// Walks an AST without evaluating it, computing the three metadata
/// figures below. Does not count toward the timeout: callers run it
/// once, outside the timed `Execute` walk.
#[derive(Debug)]
pub struct MetadataAccumulator {
    pub complexity: f64,
    pub accessed_variables: HashSet<String>,
    pub called_functions: HashSet<String>,
}

impl MetadataAccumulator {
    pub fn new() -> Self {
        Self {
            complexity: 0.0,
            accessed_variables: HashSet::new(),
            called_functions: HashSet::new(),
        }
    }

    pub fn into_metadata(self, execution_time_us: u128) -> ExecutionMetadata {
        let mut accessed: Vec<String> = self.accessed_variables.into_iter().collect();
        accessed.sort();
        let mut called: Vec<String> = self.called_functions.into_iter().collect();
        called.sort();
        ExecutionMetadata {
            execution_time_us,
            complexity: Some(self.complexity),
            accessed_variables: Some(accessed),
            called_functions: Some(called),
        }
    }
}

impl Default for MetadataAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// `{ success, value?, error?, error_kind?, metadata }`.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    pub metadata: ExecutionMetadata,
}

impl Serialize for ErrorKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl EvaluationResult {
    pub fn ok(value: Value, metadata: ExecutionMetadata) -> Self {
        Self {
            success: true,
            value: Some(value),
            error: None,
            error_kind: None,
            metadata,
        }
    }

    pub fn err(error: &EvalError, metadata: ExecutionMetadata) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(error.message.clone()),
            error_kind: Some(error.kind),
            metadata,
        }
    }
}
