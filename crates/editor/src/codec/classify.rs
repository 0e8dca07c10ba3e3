//! Shape-based discrimination between operator nodes and leaf rules.

use serde_json::Value;
use tempo_core::Operator;

/// What a wire array decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Operator(Operator),
    Leaf,
}

/// An array is an operator node iff its first element is a string whose
/// uppercase form is `AND`, `OR` or `NOT`. Everything else is a leaf.
///
/// `["AND", 1, 2, 3]` is therefore an operator node, not a corrupt leaf.
pub fn classify(items: &[Value]) -> NodeClass {
    match items.first() {
        Some(Value::String(token)) => Operator::from_token(token)
            .map(NodeClass::Operator)
            .unwrap_or(NodeClass::Leaf),
        _ => NodeClass::Leaf,
    }
}
