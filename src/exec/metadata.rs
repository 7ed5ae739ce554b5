//! Metadata extraction: a side-effect-free walk over the AST that never
//! runs on the timed path. Complexity is 0.5 per visited node;
//! accessed variables are the deduplicated set of identifiers that resolve
//! to `item`/`items`/a context variable; called functions are the
//! deduplicated set of bare-identifier callees.

use crate::ast::{Node, PropertyKey};
use crate::context::ExpressionContext;
use crate::result::MetadataAccumulator;

pub fn collect(node: &Node, ctx: &ExpressionContext) -> MetadataAccumulator {
    let mut acc = MetadataAccumulator::new();
    walk(node, ctx, &mut acc);
    acc
}

fn walk(node: &Node, ctx: &ExpressionContext, acc: &mut MetadataAccumulator) {
    acc.complexity += 0.5;
    match node {
        Node::StringLiteral(_)
        | Node::NumberLiteral(_)
        | Node::BooleanLiteral(_)
        | Node::NullLiteral => {}
        Node::Identifier(name) => {
            if name == "item" || name == "items" || ctx.variable(name).is_some() {
                acc.accessed_variables.insert(name.clone());
            }
        }
        Node::Member { object, property: _ } => {
            walk(object, ctx, acc);
        }
        Node::Index { object, property } => {
            walk(object, ctx, acc);
            walk(property, ctx, acc);
        }
        Node::Call { callee, arguments } => {
            if let Node::Identifier(name) = callee.as_ref() {
                acc.called_functions.insert(name.clone());
            } else {
                walk(callee, ctx, acc);
            }
            for arg in arguments {
                walk(arg, ctx, acc);
            }
        }
        Node::Binary { op: _, left, right } => {
            walk(left, ctx, acc);
            walk(right, ctx, acc);
        }
        Node::Unary { op: _, argument } => {
            walk(argument, ctx, acc);
        }
        Node::Conditional {
            test,
            consequent,
            alternate,
        } => {
            walk(test, ctx, acc);
            walk(consequent, ctx, acc);
            walk(alternate, ctx, acc);
        }
        Node::ArrayLiteral(elements) => {
            for element in elements.iter().flatten() {
                walk(element, ctx, acc);
            }
        }
        Node::ObjectLiteral(entries) => {
            for (key, value) in entries {
                if let PropertyKey::Computed(node) = key {
                    walk(node, ctx, acc);
                }
                walk(value, ctx, acc);
            }
        }
        Node::Arrow { params: _, body } => {
            walk(body, ctx, acc);
        }
        Node::Program(inner) => {
            walk(inner, ctx, acc);
        }
    }
}
