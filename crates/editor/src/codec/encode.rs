use serde_json::Value;
use tempo_core::{Expression, LeafRule, OperatorNode};

/// Largest integer an f64 holds exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Encode an operator node as `[TOKEN, operand...]`.
pub fn encode(node: &OperatorNode) -> Value {
    let mut items = Vec::with_capacity(node.operands.len() + 1);
    items.push(Value::from(node.operator.token()));
    items.extend(node.operands.iter().map(encode_expression));
    Value::Array(items)
}

pub fn encode_expression(expression: &Expression) -> Value {
    match expression {
        Expression::Operator(node) => encode(node),
        Expression::Leaf(rule) => encode_leaf(rule),
    }
}

/// Encode a leaf as `[from, to, unit, recurrence]`.
pub fn encode_leaf(rule: &LeafRule) -> Value {
    Value::Array(vec![
        encode_number(rule.from),
        encode_number(rule.to),
        Value::from(rule.unit.as_str()),
        Value::from(rule.recurrence.as_str()),
    ])
}

/// Whole numbers are written as integers (`10`, not `10.0`); NaN and
/// infinities have no JSON form and are written as `null`.
pub fn encode_number(x: f64) -> Value {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < MAX_SAFE_INTEGER {
        Value::from(x as i64)
    } else {
        Value::from(x)
    }
}

/// Compact JSON string, the form written into bound fields.
pub fn to_json(node: &OperatorNode) -> String {
    encode(node).to_string()
}
