use serde_json::Value;
use tracing::debug;

use tempo_core::{
    Expression, LeafRule, Operator, OperatorNode, Recurrence, Result, TempoError, TimeUnit,
};

use super::classify::{classify, NodeClass};
use crate::path::NodePath;
use crate::validation::fuzzy::{suggest_recurrence, suggest_unit};

/// Decoder carrying the leaf used for "no rule supplied" (`[]`) operands.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    default_leaf: LeafRule,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(LeafRule::default())
    }
}

impl Decoder {
    pub fn new(default_leaf: LeafRule) -> Self {
        Self { default_leaf }
    }

    /// Leaf substituted for empty operand arrays.
    pub fn default_leaf(&self) -> LeafRule {
        self.default_leaf
    }

    /// Parse a JSON string whose top level must be an operator node.
    pub fn parse(&self, raw: &str) -> Result<OperatorNode> {
        let value: Value = serde_json::from_str(raw)?;
        self.decode(&value)
    }

    /// Decode a value whose top level must be an operator node.
    pub fn decode(&self, value: &Value) -> Result<OperatorNode> {
        let items = value
            .as_array()
            .ok_or_else(|| TempoError::Format(format!("expected an array, got {value}")))?;
        match classify(items) {
            NodeClass::Operator(operator) => {
                let node = self.decode_operator(operator, &items[1..], &NodePath::root())?;
                debug!(
                    operator = %node.operator,
                    leaves = node.leaf_count(),
                    depth = node.depth(),
                    "decoded expression"
                );
                Ok(node)
            }
            NodeClass::Leaf => Err(TempoError::Format(format!(
                "first element must be one of AND, OR, NOT, got {}",
                items.first().map(Value::to_string).unwrap_or_else(|| "nothing".to_string())
            ))),
        }
    }

    /// Decode any expression, leaf or operator, at the root.
    pub fn decode_expression(&self, value: &Value) -> Result<Expression> {
        self.decode_operand(value, &NodePath::root())
    }

    fn decode_operator(
        &self,
        operator: Operator,
        operands: &[Value],
        path: &NodePath,
    ) -> Result<OperatorNode> {
        let operands = operands
            .iter()
            .enumerate()
            .map(|(i, operand)| self.decode_operand(operand, &path.child(i)))
            .collect::<Result<Vec<_>>>()?;
        Ok(OperatorNode::new(operator, operands))
    }

    fn decode_operand(&self, value: &Value, path: &NodePath) -> Result<Expression> {
        let items = value.as_array().ok_or_else(|| TempoError::UnexpectedOperand {
            path: path.to_string(),
            found: value.to_string(),
        })?;
        match classify(items) {
            NodeClass::Operator(operator) => self
                .decode_operator(operator, &items[1..], path)
                .map(Expression::Operator),
            NodeClass::Leaf => self.decode_leaf(items, path).map(Expression::Leaf),
        }
    }

    fn decode_leaf(&self, items: &[Value], path: &NodePath) -> Result<LeafRule> {
        if items.is_empty() {
            return Ok(self.default_leaf);
        }
        if items.len() != 4 {
            return Err(TempoError::LeafArity {
                path: path.to_string(),
                len: items.len(),
            });
        }
        Ok(LeafRule {
            from: coerce_number(&items[0]),
            to: coerce_number(&items[1]),
            unit: decode_unit(&items[2])?,
            recurrence: decode_recurrence(&items[3])?,
        })
    }
}

/// Numbers pass through, strings are parsed, anything else is NaN.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number(s),
        _ => f64::NAN,
    }
}

/// Standard numeric parse of trimmed text; invalid text is NaN, never an error.
pub fn parse_number(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}

pub(crate) fn parse_unit(raw: &str) -> Result<TimeUnit> {
    raw.parse().map_err(|_| TempoError::UnknownUnit {
        value: raw.to_string(),
        suggestion: suggest_unit(raw),
    })
}

pub(crate) fn parse_recurrence(raw: &str) -> Result<Recurrence> {
    raw.parse().map_err(|_| TempoError::UnknownUnit {
        value: raw.to_string(),
        suggestion: suggest_recurrence(raw),
    })
}

fn decode_unit(value: &Value) -> Result<TimeUnit> {
    match value {
        Value::String(s) => parse_unit(s),
        other => Err(TempoError::UnknownUnit {
            value: other.to_string(),
            suggestion: None,
        }),
    }
}

fn decode_recurrence(value: &Value) -> Result<Recurrence> {
    match value {
        Value::Null => Ok(Recurrence::None),
        Value::String(s) => parse_recurrence(s),
        other => Err(TempoError::UnknownUnit {
            value: other.to_string(),
            suggestion: None,
        }),
    }
}

/// [`Decoder::parse`] with the stock default leaf.
pub fn parse(raw: &str) -> Result<OperatorNode> {
    Decoder::default().parse(raw)
}

/// [`Decoder::decode`] with the stock default leaf.
pub fn decode(value: &Value) -> Result<OperatorNode> {
    Decoder::default().decode(value)
}

/// [`Decoder::decode_expression`] with the stock default leaf.
pub fn decode_expression(value: &Value) -> Result<Expression> {
    Decoder::default().decode_expression(value)
}
