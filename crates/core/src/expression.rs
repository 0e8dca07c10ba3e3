//! Recurrence expression tree: operator nodes over leaf time-window rules.
//!
//! The shape is decided once, when the wire array is decoded; everything
//! downstream dispatches on [`Expression`] instead of re-inspecting arrays.

use crate::unit::{Operator, Recurrence, TimeUnit};

/// A node of the recurrence expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// AND/OR/NOT over an ordered operand list.
    Operator(OperatorNode),
    /// A single time window with its recurrence.
    Leaf(LeafRule),
}

/// Operator node. Arity is not enforced, not even for NOT.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorNode {
    pub operator: Operator,
    pub operands: Vec<Expression>,
}

/// "Between `from` and `to` `unit`, every `recurrence`".
///
/// Bounds are plain `f64`: text that fails to parse becomes NaN and is carried as-is.
/// Equality treats two NaN bounds as equal, so a decoded leaf compares equal
/// to the leaf it was encoded from.
#[derive(Debug, Clone, Copy)]
pub struct LeafRule {
    pub from: f64,
    pub to: f64,
    pub unit: TimeUnit,
    pub recurrence: Recurrence,
}

impl LeafRule {
    pub fn new(from: f64, to: f64, unit: TimeUnit, recurrence: impl Into<Recurrence>) -> Self {
        Self {
            from,
            to,
            unit,
            recurrence: recurrence.into(),
        }
    }

    /// True when either bound is NaN.
    pub fn has_nan_bound(&self) -> bool {
        self.from.is_nan() || self.to.is_nan()
    }
}

impl PartialEq for LeafRule {
    fn eq(&self, other: &Self) -> bool {
        same_bound(self.from, other.from)
            && same_bound(self.to, other.to)
            && self.unit == other.unit
            && self.recurrence == other.recurrence
    }
}

fn same_bound(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl Default for LeafRule {
    /// Hours 10 to 12, every day.
    fn default() -> Self {
        Self::new(10.0, 12.0, TimeUnit::Hour, TimeUnit::Day)
    }
}

impl OperatorNode {
    pub fn new(operator: Operator, operands: Vec<Expression>) -> Self {
        Self { operator, operands }
    }

    /// The set a fresh editor starts with: OR over the given default leaf.
    pub fn default_set(default_leaf: LeafRule) -> Self {
        Self::new(Operator::Or, vec![Expression::Leaf(default_leaf)])
    }

    /// Number of leaves anywhere below this node.
    pub fn leaf_count(&self) -> usize {
        self.operands
            .iter()
            .map(|operand| match operand {
                Expression::Leaf(_) => 1,
                Expression::Operator(node) => node.leaf_count(),
            })
            .sum()
    }

    /// Depth of the tree rooted here; a node with only leaves has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .operands
            .iter()
            .map(|operand| match operand {
                Expression::Leaf(_) => 0,
                Expression::Operator(node) => node.depth(),
            })
            .max()
            .unwrap_or(0)
    }
}

impl Default for OperatorNode {
    fn default() -> Self {
        Self::default_set(LeafRule::default())
    }
}

impl Expression {
    pub fn as_operator(&self) -> Option<&OperatorNode> {
        match self {
            Expression::Operator(node) => Some(node),
            Expression::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafRule> {
        match self {
            Expression::Leaf(rule) => Some(rule),
            Expression::Operator(_) => None,
        }
    }
}

impl From<LeafRule> for Expression {
    fn from(rule: LeafRule) -> Self {
        Expression::Leaf(rule)
    }
}

impl From<OperatorNode> for Expression {
    fn from(node: OperatorNode) -> Self {
        Expression::Operator(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_wraps_one_default_leaf() {
        let set = OperatorNode::default();
        assert_eq!(set.operator, Operator::Or);
        assert_eq!(set.operands, vec![Expression::Leaf(LeafRule::default())]);
        assert_eq!(set.leaf_count(), 1);
        assert_eq!(set.depth(), 1);
    }

    #[test]
    fn depth_and_leaf_count_follow_nesting() {
        let inner = OperatorNode::new(
            Operator::And,
            vec![
                LeafRule::new(1.0, 2.0, TimeUnit::Minute, Recurrence::None).into(),
                OperatorNode::new(Operator::Not, vec![LeafRule::default().into()]).into(),
            ],
        );
        let root = OperatorNode::new(Operator::Or, vec![inner.into(), LeafRule::default().into()]);
        assert_eq!(root.depth(), 3);
        assert_eq!(root.leaf_count(), 3);
        assert!(root.operands[0].as_operator().is_some());
        assert!(root.operands[1].as_leaf().is_some());
    }

    #[test]
    fn nan_bounds_are_reported() {
        let rule = LeafRule::new(f64::NAN, 2.0, TimeUnit::Hour, TimeUnit::Day);
        assert!(rule.has_nan_bound());
        assert!(!LeafRule::default().has_nan_bound());
    }

    #[test]
    fn nan_bounds_compare_equal() {
        let a = LeafRule::new(f64::NAN, 2.0, TimeUnit::Hour, TimeUnit::Day);
        let b = LeafRule::new(f64::NAN, 2.0, TimeUnit::Hour, TimeUnit::Day);
        assert_eq!(a, b);
        assert_eq!(Expression::Leaf(a), Expression::Leaf(b));

        assert_ne!(a, LeafRule::new(1.0, 2.0, TimeUnit::Hour, TimeUnit::Day));
        assert_ne!(a, LeafRule::new(f64::NAN, 2.0, TimeUnit::Hour, Recurrence::None));
    }
}
