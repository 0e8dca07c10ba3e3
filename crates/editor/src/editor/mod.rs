//! Headless recurrence-expression editor.
//!
//! - [`ExpressionTreeEditor`]: one operator node with its operands, recursive
//! - [`LeafRuleEditor`]: one time-window rule
//! - [`BoundEditor`]: the root observer that keeps a [`BoundField`](crate::field::BoundField) in sync

mod bound;
mod leaf;
mod render;
mod tree;


pub use self::bound::BoundEditor;
pub use self::leaf::{LeafControl, LeafRuleEditor};
pub use self::render::{describe_leaf, render};
pub use self::tree::{ExpressionTreeEditor, Operand};
