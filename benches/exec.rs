#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use flow_expr_eval::ast::{BinaryOp, Node, UnaryOp};
use flow_expr_eval::builtins::default_registry;
use flow_expr_eval::context::ExpressionContext;
use flow_expr_eval::exec::Executor;
use flow_expr_eval::value::Value;

fn property_chain() -> Node {
    // item.user.address.city
    let mut node = Node::Identifier("item".to_string());
    for property in ["user", "address", "city"] {
        node = Node::Member {
            object: Box::new(node),
            property: property.to_string(),
        };
    }
    node
}

fn property_chain_execution(c: &mut Criterion) {
    let executor = Executor::new(default_registry());
    let mut city = indexmap::IndexMap::new();
    city.insert("city".to_string(), Value::string("Berlin"));
    let mut address = indexmap::IndexMap::new();
    address.insert("address".to_string(), Value::object(city));
    let mut user = indexmap::IndexMap::new();
    user.insert("user".to_string(), Value::object(address));
    let item = Value::object(user);
    let ctx = ExpressionContext::new(item, Value::array(vec![]));
    let node = property_chain();

    c.bench_function("property chain access", move |b| {
        b.iter(|| executor.execute(black_box(&node), black_box(&ctx)))
    });
}

fn nested_conditional(depth: u64) -> Node {
    // A deeply nested conditional/arithmetic expression, used to exercise
    // the dispatch loop's recursion depth within a single call.
    let mut node = Node::NumberLiteral(1.0);
    for i in 0..depth {
        node = Node::Conditional {
            test: Box::new(Node::Binary {
                op: BinaryOp::Gt,
                left: Box::new(Node::NumberLiteral(i as f64)),
                right: Box::new(Node::NumberLiteral(0.0)),
            }),
            consequent: Box::new(Node::Binary {
                op: BinaryOp::Add,
                left: Box::new(node),
                right: Box::new(Node::NumberLiteral(1.0)),
            }),
            alternate: Box::new(Node::NumberLiteral(0.0)),
        };
    }
    node
}

fn deep_dispatch_execution(c: &mut Criterion) {
    let executor = Executor::new(default_registry());
    let ctx = ExpressionContext::new(Value::Null, Value::array(vec![]));
    let node = nested_conditional(30);

    c.bench_function("deep conditional/arithmetic dispatch", move |b| {
        b.iter(|| executor.execute(black_box(&node), black_box(&ctx)))
    });
}

fn array_filter_map_execution(c: &mut Criterion) {
    let executor = Executor::new(default_registry());
    let items: Vec<Option<Node>> = (0..100).map(|n| Some(Node::NumberLiteral(n as f64))).collect();
    let ctx = ExpressionContext::new(Value::Null, Value::array(vec![]));

    let filter_callback = Node::Arrow {
        params: vec!["x".to_string()],
        body: Box::new(Node::Binary {
            op: BinaryOp::Gt,
            left: Box::new(Node::Identifier("x".to_string())),
            right: Box::new(Node::NumberLiteral(50.0)),
        }),
    };
    let map_callback = Node::Arrow {
        params: vec!["x".to_string()],
        body: Box::new(Node::Binary {
            op: BinaryOp::Mul,
            left: Box::new(Node::Identifier("x".to_string())),
            right: Box::new(Node::NumberLiteral(2.0)),
        }),
    };
    let filtered = Node::Call {
        callee: Box::new(Node::Member {
            object: Box::new(Node::ArrayLiteral(items)),
            property: "filter".to_string(),
        }),
        arguments: vec![filter_callback],
    };
    let node = Node::Call {
        callee: Box::new(Node::Member {
            object: Box::new(filtered),
            property: "map".to_string(),
        }),
        arguments: vec![map_callback],
    };

    c.bench_function("filter + map over 100 elements", move |b| {
        b.iter(|| executor.execute(black_box(&node), black_box(&ctx)))
    });
}

fn unary_not_execution(c: &mut Criterion) {
    let executor = Executor::new(default_registry());
    let ctx = ExpressionContext::new(Value::Null, Value::array(vec![]));
    let node = Node::Unary {
        op: UnaryOp::Not,
        argument: Box::new(Node::BooleanLiteral(false)),
    };

    c.bench_function("unary not", move |b| {
        b.iter(|| executor.execute(black_box(&node), black_box(&ctx)))
    });
}

criterion_group!(
    benches,
    property_chain_execution,
    deep_dispatch_execution,
    array_filter_map_execution,
    unary_not_execution
);
criterion_main!(benches);
