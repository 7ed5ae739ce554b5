//! Integration coverage for the documented concrete scenarios and
//! cross-cutting invariants (determinism, coercion agreement, idempotence,
//! equality, short-circuiting, resource bounds) exercised through the
//! public API rather than internal dispatch details.

use flow_expr_eval::ast::{BinaryOp, Node, PropertyKey, UnaryOp};
use flow_expr_eval::builtins::default_registry;
use flow_expr_eval::context::ExpressionContext;
use flow_expr_eval::error::ErrorKind;
use flow_expr_eval::exec::Executor;
use flow_expr_eval::options::ExecutionOptions;
use flow_expr_eval::registry::SafeFunction;
use flow_expr_eval::value::{to_bool, to_number, Value};
use rustc_hash::FxHashMap;
use std::sync::Arc;

fn num(n: f64) -> Node {
    Node::NumberLiteral(n)
}

fn empty_context() -> ExpressionContext {
    ExpressionContext::new(Value::Null, Value::array(vec![]))
}

#[test]
fn item_name_to_upper_case_via_registered_method() {
    let executor = Executor::new(default_registry());
    let mut item = indexmap::IndexMap::new();
    item.insert("name".to_string(), Value::string("ada"));
    let ctx = ExpressionContext::new(Value::object(item), Value::array(vec![]));

    let node = Node::Call {
        callee: Box::new(Node::Member {
            object: Box::new(Node::Member {
                object: Box::new(Node::Identifier("item".to_string())),
                property: "name".to_string(),
            }),
            property: "toUpperCase".to_string(),
        }),
        arguments: vec![],
    };

    let result = executor.execute(&node, &ctx);
    assert_eq!(result.value, Some(Value::string("ADA")));
}

#[test]
fn optional_chaining_through_undefined_falls_back_with_nullish_coalesce() {
    let executor = Executor::new(default_registry());
    let node = Node::Binary {
        op: BinaryOp::NullishCoalesce,
        left: Box::new(Node::Member {
            object: Box::new(Node::Identifier("undef".to_string())),
            property: "field".to_string(),
        }),
        right: Box::new(Node::StringLiteral("fallback".to_string())),
    };
    let result = executor.execute(&node, &empty_context());
    assert_eq!(result.value, Some(Value::string("fallback")));
}

#[test]
fn array_index_access_supports_bracket_and_length() {
    let executor = Executor::new(default_registry());
    let array = Node::ArrayLiteral(vec![Some(num(10.0)), Some(num(20.0)), Some(num(30.0))]);
    let indexed = Node::Index {
        object: Box::new(array.clone()),
        property: Box::new(num(1.0)),
    };
    let length = Node::Member {
        object: Box::new(array),
        property: "length".to_string(),
    };
    assert_eq!(
        executor.execute(&indexed, &empty_context()).value,
        Some(Value::Number(20.0))
    );
    assert_eq!(
        executor.execute(&length, &empty_context()).value,
        Some(Value::Number(3.0))
    );
}

#[test]
fn object_literal_keeps_last_write_on_duplicate_keys_in_source_order() {
    let executor = Executor::new(default_registry());
    let node = Node::ObjectLiteral(vec![
        (PropertyKey::Identifier("a".to_string()), num(1.0)),
        (PropertyKey::Identifier("b".to_string()), num(2.0)),
        (PropertyKey::Identifier("a".to_string()), num(3.0)),
    ]);
    let result = executor.execute(&node, &empty_context());
    match result.value.unwrap() {
        Value::Object(map) => {
            assert_eq!(map.get("a"), Some(&Value::Number(3.0)));
            let keys: Vec<&String> = map.keys().collect();
            assert_eq!(keys, vec!["a", "b"]);
        }
        other => panic!("expected an object, got {:?}", other),
    }
}

#[test]
fn strict_and_loose_equality_agree_with_self() {
    let executor = Executor::new(default_registry());
    for op in [BinaryOp::Eq, BinaryOp::StrictEq] {
        let node = Node::Binary {
            op,
            left: Box::new(num(1.0)),
            right: Box::new(num(1.0)),
        };
        assert_eq!(
            executor.execute(&node, &empty_context()).value,
            Some(Value::Boolean(true))
        );
    }
}

#[test]
fn nan_is_never_strictly_or_loosely_equal_to_itself() {
    let executor = Executor::new(default_registry());
    let nan = Node::Binary {
        op: BinaryOp::Div,
        left: Box::new(num(0.0)),
        right: Box::new(num(0.0)),
    };
    let node = Node::Binary {
        op: BinaryOp::StrictEq,
        left: Box::new(nan.clone()),
        right: Box::new(nan),
    };
    let result = executor.execute(&node, &empty_context());
    assert_eq!(result.value, Some(Value::Boolean(false)));
}

#[test]
fn to_bool_and_to_number_agree_on_truthiness_of_zero_and_empty_string() {
    assert!(!to_bool(&Value::Number(0.0)));
    assert_eq!(to_number(&Value::Number(0.0)).0, 0.0);
    assert!(!to_bool(&Value::string("")));
    assert_eq!(to_number(&Value::string("")).0, 0.0);
}

#[test]
fn context_variables_are_visible_to_expressions() {
    let executor = Executor::new(default_registry());
    let mut variables = FxHashMap::default();
    variables.insert("threshold".to_string(), Value::Number(10.0));
    let ctx = ExpressionContext::new(Value::Null, Value::array(vec![])).with_variables(variables);
    let node = Node::Binary {
        op: BinaryOp::Gt,
        left: Box::new(Node::Identifier("threshold".to_string())),
        right: Box::new(num(5.0)),
    };
    let result = executor.execute(&node, &ctx);
    assert_eq!(result.value, Some(Value::Boolean(true)));
}

#[test]
fn reduce_on_empty_array_without_initial_value_is_a_type_error() {
    let executor = Executor::new(default_registry());
    let node = Node::Call {
        callee: Box::new(Node::Member {
            object: Box::new(Node::ArrayLiteral(vec![])),
            property: "reduce".to_string(),
        }),
        arguments: vec![Node::Arrow {
            params: vec!["a".to_string(), "b".to_string()],
            body: Box::new(Node::Identifier("a".to_string())),
        }],
    };
    let result = executor.execute(&node, &empty_context());
    assert!(!result.success);
    assert_eq!(result.error_kind, Some(ErrorKind::Type));
}

#[test]
fn some_and_every_short_circuit_on_first_decisive_element() {
    let executor = Executor::new(default_registry());
    let array = Node::ArrayLiteral(vec![Some(num(1.0)), Some(num(2.0)), Some(num(3.0))]);
    let is_positive = Node::Arrow {
        params: vec!["x".to_string()],
        body: Box::new(Node::Binary {
            op: BinaryOp::Gt,
            left: Box::new(Node::Identifier("x".to_string())),
            right: Box::new(num(0.0)),
        }),
    };
    let node = Node::Call {
        callee: Box::new(Node::Member {
            object: Box::new(array),
            property: "every".to_string(),
        }),
        arguments: vec![is_positive],
    };
    let result = executor.execute(&node, &empty_context());
    assert_eq!(result.value, Some(Value::Boolean(true)));
}

#[test]
fn conditional_expression_evaluates_only_the_taken_branch() {
    let mut registry = default_registry();
    registry.register(SafeFunction::new("explode", 0, 0, |_args: &[Value]| {
        panic!("should never be called");
    }));
    let executor = Executor::new(registry);
    let node = Node::Conditional {
        test: Box::new(Node::BooleanLiteral(true)),
        consequent: Box::new(num(1.0)),
        alternate: Box::new(Node::Call {
            callee: Box::new(Node::Identifier("explode".to_string())),
            arguments: vec![],
        }),
    };
    let result = executor.execute(&node, &empty_context());
    assert_eq!(result.value, Some(Value::Number(1.0)));
}

#[test]
fn execution_options_builder_rejects_non_positive_overrides() {
    let options = ExecutionOptions::new()
        .with_timeout_ms(-1)
        .with_max_stack_depth(0);
    assert_eq!(options.timeout_ms(), 5000);
    assert_eq!(options.max_stack_depth(), 50);
}

#[test]
fn error_handler_receives_the_original_node_and_context() {
    let executor = Executor::new(default_registry());
    let seen_context_item = Arc::new(std::sync::Mutex::new(None));
    let captured = seen_context_item.clone();
    let options = ExecutionOptions::new().with_error_handler(Arc::new(move |_err, _node, ctx| {
        *captured.lock().unwrap() = Some(ctx.item.clone());
        Ok(Value::Null)
    }));
    let mut ctx_item = indexmap::IndexMap::new();
    ctx_item.insert("id".to_string(), Value::Number(7.0));
    let ctx = ExpressionContext::new(Value::object(ctx_item), Value::array(vec![]));
    let node = Node::Call {
        callee: Box::new(Node::Identifier("missing".to_string())),
        arguments: vec![],
    };
    let result = executor.execute_with_options(&node, &ctx, &options);
    assert!(result.success);
    let captured_item = seen_context_item.lock().unwrap().clone();
    assert_eq!(captured_item, Some(ctx.item));
}

#[test]
fn unary_minus_and_plus_coerce_through_to_number() {
    let executor = Executor::new(default_registry());
    let negate = Node::Unary {
        op: UnaryOp::Minus,
        argument: Box::new(Node::StringLiteral("5".to_string())),
    };
    assert_eq!(
        executor.execute(&negate, &empty_context()).value,
        Some(Value::Number(-5.0))
    );
}
