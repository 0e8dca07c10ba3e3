//! Recursive operator-node editor.

use tracing::debug;

use tempo_core::{Expression, LeafRule, Operator, OperatorNode, Result};

use super::leaf::LeafRuleEditor;
use crate::codec::{self, Decoder, DEFAULT_SET};
use crate::path::NodePath;

/// One operand slot of an operator node.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Leaf(LeafRuleEditor),
    Set(ExpressionTreeEditor),
}

impl Operand {
    pub fn serialize(&self) -> Expression {
        match self {
            Operand::Leaf(leaf) => Expression::Leaf(leaf.get_value()),
            Operand::Set(set) => Expression::Operator(set.serialize()),
        }
    }

    /// Detach the operand, returning the expression it last held.
    pub fn remove(self) -> Expression {
        match self {
            Operand::Leaf(leaf) => Expression::Leaf(leaf.remove()),
            Operand::Set(set) => Expression::Operator(set.remove()),
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafRuleEditor> {
        match self {
            Operand::Leaf(leaf) => Some(leaf),
            Operand::Set(_) => None,
        }
    }

    pub fn as_set(&self) -> Option<&ExpressionTreeEditor> {
        match self {
            Operand::Set(set) => Some(set),
            Operand::Leaf(_) => None,
        }
    }
}

/// Editor for one operator node and its ordered operands.
///
/// Each editor owns its operands outright; removing an operand drops its
/// whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionTreeEditor {
    operator: Operator,
    operands: Vec<Operand>,
    default_leaf: LeafRule,
}

impl ExpressionTreeEditor {
    /// Build the editor tree for an already-decoded node.
    pub fn new(node: &OperatorNode, default_leaf: LeafRule) -> Self {
        let operands = node
            .operands
            .iter()
            .map(|operand| match operand {
                Expression::Leaf(rule) => Operand::Leaf(LeafRuleEditor::from_rule(rule)),
                Expression::Operator(inner) => Operand::Set(Self::new(inner, default_leaf)),
            })
            .collect();
        Self {
            operator: node.operator,
            operands,
            default_leaf,
        }
    }

    /// Build from a bound field's value; an empty value yields the default set.
    pub fn from_value(raw: &str, decoder: &Decoder) -> Result<Self> {
        let node = if raw.trim().is_empty() {
            decoder.parse(DEFAULT_SET)?
        } else {
            decoder.parse(raw)?
        };
        Ok(Self::new(&node, decoder.default_leaf()))
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn set_operator(&mut self, operator: Operator) {
        self.operator = operator;
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub fn operand(&self, index: usize) -> Option<&Operand> {
        self.operands.get(index)
    }

    pub fn operand_mut(&mut self, index: usize) -> Option<&mut Operand> {
        self.operands.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.operands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }

    /// Append a leaf editor and return its operand index.
    pub fn add_leaf(&mut self, initial: Option<LeafRule>) -> usize {
        let rule = initial.unwrap_or(self.default_leaf);
        self.operands.push(Operand::Leaf(LeafRuleEditor::from_rule(&rule)));
        self.operands.len() - 1
    }

    /// Append a nested editor and return its operand index.
    ///
    /// The nested editor is built from the wire form of `initial` (or of
    /// `["OR",[]]`), exactly as if it had been read from a field.
    pub fn add_operator_node(&mut self, initial: Option<&OperatorNode>) -> Result<usize> {
        let decoder = Decoder::new(self.default_leaf);
        let node = match initial {
            Some(node) => decoder.decode(&codec::encode(node))?,
            None => decoder.parse(DEFAULT_SET)?,
        };
        self.operands.push(Operand::Set(Self::new(&node, self.default_leaf)));
        Ok(self.operands.len() - 1)
    }

    /// Remove the operand at `index`, detaching its subtree.
    pub fn remove_operand(&mut self, index: usize) -> Option<Operand> {
        if index >= self.operands.len() {
            return None;
        }
        let removed = self.operands.remove(index);
        debug!(index, remaining = self.operands.len(), "operand removed");
        Some(removed)
    }

    /// Detach this editor and its subtree, returning the value it last held.
    pub fn remove(self) -> OperatorNode {
        self.serialize()
    }

    /// Read the operator selector and every operand, recursively.
    pub fn serialize(&self) -> OperatorNode {
        OperatorNode::new(
            self.operator,
            self.operands.iter().map(Operand::serialize).collect(),
        )
    }

    /// The operator node at `path`, or `None` if the path is missing or ends on a leaf.
    pub fn node(&self, path: &NodePath) -> Option<&ExpressionTreeEditor> {
        let mut current = self;
        for &index in path.indices() {
            current = match current.operands.get(index)? {
                Operand::Set(set) => set,
                Operand::Leaf(_) => return None,
            };
        }
        Some(current)
    }

    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut ExpressionTreeEditor> {
        let mut current = self;
        for &index in path.indices() {
            current = match current.operands.get_mut(index)? {
                Operand::Set(set) => set,
                Operand::Leaf(_) => return None,
            };
        }
        Some(current)
    }

    /// The leaf editor at `path`.
    pub fn leaf(&self, path: &NodePath) -> Option<&LeafRuleEditor> {
        let (parent, index) = path.split_last()?;
        self.node(&parent)?.operand(index)?.as_leaf()
    }

    pub fn leaf_mut(&mut self, path: &NodePath) -> Option<&mut LeafRuleEditor> {
        let (parent, index) = path.split_last()?;
        match self.node_mut(&parent)?.operand_mut(index)? {
            Operand::Leaf(leaf) => Some(leaf),
            Operand::Set(_) => None,
        }
    }
}
