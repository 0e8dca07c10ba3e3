//! Root observer binding an editor tree to a form field.

use tracing::{debug, info, warn};
use uuid::Uuid;

use tempo_core::{EditorConfig, Expression, LeafRule, Operator, OperatorNode, Result, TempoError};

use super::leaf::LeafControl;
use super::render::render;
use super::tree::ExpressionTreeEditor;
use crate::codec::{self, Decoder};
use crate::field::BoundField;
use crate::path::NodePath;

/// An expression editor attached to a bound field.
///
/// Every mutation goes through this type. After each one the whole root is
/// serialized, written into the field, and a change notification is emitted,
/// in that order.
pub struct BoundEditor<F: BoundField> {
    field: F,
    root: Option<ExpressionTreeEditor>,
    decoder: Decoder,
    widget_id: Uuid,
}

impl<F: BoundField> BoundEditor<F> {
    /// Attach to `field`, reading its current value.
    ///
    /// An empty value starts from the default set. Anything else must be a
    /// JSON operator array; malformed values are rejected, never replaced.
    pub fn attach(field: F, config: &EditorConfig) -> Result<Self> {
        let decoder = Decoder::new(config.default_leaf());
        let root = ExpressionTreeEditor::from_value(field.value(), &decoder)?;
        let mut editor = Self {
            field,
            root: Some(root),
            decoder,
            widget_id: Uuid::new_v4(),
        };
        info!(widget = %editor.widget_id, "expression editor attached");
        editor.sync();
        Ok(editor)
    }

    /// Attach to `field`, replacing its value with `node`.
    pub fn from_expression(field: F, node: &OperatorNode, config: &EditorConfig) -> Self {
        let decoder = Decoder::new(config.default_leaf());
        let mut editor = Self {
            field,
            root: Some(ExpressionTreeEditor::new(node, decoder.default_leaf())),
            decoder,
            widget_id: Uuid::new_v4(),
        };
        info!(widget = %editor.widget_id, "expression editor attached");
        editor.sync();
        editor
    }

    pub fn widget_id(&self) -> Uuid {
        self.widget_id
    }

    pub fn is_attached(&self) -> bool {
        self.root.is_some()
    }

    pub fn root(&self) -> Option<&ExpressionTreeEditor> {
        self.root.as_ref()
    }

    /// Current expression, or `None` after the root was removed.
    pub fn expression(&self) -> Option<OperatorNode> {
        self.root.as_ref().map(ExpressionTreeEditor::serialize)
    }

    /// Current value of the bound field.
    pub fn value(&self) -> &str {
        self.field.value()
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    /// Text rendering of the tree; empty when detached.
    pub fn render(&self) -> String {
        self.root.as_ref().map(render).unwrap_or_default()
    }

    /// Append a leaf to the operator node at `at`.
    pub fn add_leaf(&mut self, at: &NodePath, initial: Option<LeafRule>) -> Result<NodePath> {
        let index = self.node_mut(at)?.add_leaf(initial);
        self.sync();
        Ok(at.child(index))
    }

    /// Append a nested operator node to the operator node at `at`.
    pub fn add_operator_node(
        &mut self,
        at: &NodePath,
        initial: Option<&OperatorNode>,
    ) -> Result<NodePath> {
        let index = self.node_mut(at)?.add_operator_node(initial)?;
        self.sync();
        Ok(at.child(index))
    }

    /// Remove the operand at `path`, returning the expression it held.
    ///
    /// The root itself is removed with [`remove_root`](Self::remove_root).
    pub fn remove(&mut self, path: &NodePath) -> Result<Expression> {
        let (parent, index) = path
            .split_last()
            .ok_or_else(|| TempoError::InvalidPath("the root is removed with remove_root".to_string()))?;
        let removed = self
            .node_mut(&parent)?
            .remove_operand(index)
            .ok_or_else(|| TempoError::InvalidPath(format!("no operand at {path}")))?;
        self.sync();
        Ok(removed.remove())
    }

    pub fn set_operator(&mut self, path: &NodePath, operator: Operator) -> Result<()> {
        self.node_mut(path)?.set_operator(operator);
        self.sync();
        Ok(())
    }

    /// Edit one control of the leaf at `path`, returning the leaf's new value.
    pub fn edit_leaf(&mut self, path: &NodePath, control: LeafControl, text: &str) -> Result<LeafRule> {
        let leaf = self
            .root_mut()?
            .leaf_mut(path)
            .ok_or_else(|| TempoError::InvalidPath(format!("no leaf at {path}")))?;
        if let Err(e) = leaf.set_control(control, text) {
            warn!(path = %path, control = %control, error = %e, "leaf edit rejected");
            return Err(e);
        }
        let value = leaf.get_value();
        self.sync();
        Ok(value)
    }

    /// Remove the whole tree and clear the field.
    pub fn remove_root(&mut self) -> Result<OperatorNode> {
        let root = self.root.take().ok_or(TempoError::Detached)?;
        info!(widget = %self.widget_id, "expression tree removed");
        self.clear_field();
        Ok(root.remove())
    }

    /// Start over with the default set after the root was removed.
    ///
    /// Returns `false` when a tree is already attached.
    pub fn create(&mut self) -> Result<bool> {
        if self.root.is_some() {
            return Ok(false);
        }
        let node = self.decoder.parse(codec::DEFAULT_SET)?;
        self.root = Some(ExpressionTreeEditor::new(&node, self.decoder.default_leaf()));
        info!(widget = %self.widget_id, "expression tree created");
        self.sync();
        Ok(true)
    }

    /// Tear the widget down: drop every node, reset the field to `""` and
    /// hand the field back.
    pub fn destroy(mut self) -> F {
        self.root = None;
        info!(widget = %self.widget_id, "expression editor destroyed");
        self.clear_field();
        self.field
    }

    fn root_mut(&mut self) -> Result<&mut ExpressionTreeEditor> {
        self.root.as_mut().ok_or(TempoError::Detached)
    }

    fn node_mut(&mut self, path: &NodePath) -> Result<&mut ExpressionTreeEditor> {
        self.root_mut()?
            .node_mut(path)
            .ok_or_else(|| TempoError::InvalidPath(format!("no operator node at {path}")))
    }

    fn clear_field(&mut self) {
        self.field.set_value(String::new());
        self.field.emit_change();
    }

    /// Serialize the root into the field, then notify.
    fn sync(&mut self) {
        let Some(root) = &self.root else {
            return;
        };
        let json = codec::to_json(&root.serialize());
        debug!(widget = %self.widget_id, value = %json, "bound field synchronized");
        self.field.set_value(json);
        self.field.emit_change();
    }
}
