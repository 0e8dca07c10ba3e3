//! Text rendering of an editor tree.

use std::fmt::Write;

use tempo_core::{LeafRule, Recurrence};

use super::tree::{ExpressionTreeEditor, Operand};

/// Render the tree as indented text, one node per line.
///
/// ```text
/// OR
/// ├── between 10 and 12 hour, every day
/// └── AND
///     └── between 1 and 2 minute, no recurrence
/// ```
pub fn render(root: &ExpressionTreeEditor) -> String {
    let mut out = String::new();
    out.push_str(root.operator().token());
    out.push('\n');
    render_operands(root, "", &mut out);
    out
}

/// One-line description of a leaf rule.
pub fn describe_leaf(rule: &LeafRule) -> String {
    let recurrence = match rule.recurrence {
        Recurrence::Every(unit) => format!("every {unit}"),
        Recurrence::None => "no recurrence".to_string(),
    };
    format!("between {} and {} {}, {}", rule.from, rule.to, rule.unit, recurrence)
}

fn render_operands(node: &ExpressionTreeEditor, prefix: &str, out: &mut String) {
    let count = node.len();
    for (i, operand) in node.operands().iter().enumerate() {
        let last = i + 1 == count;
        let branch = if last { "└── " } else { "├── " };
        match operand {
            Operand::Leaf(leaf) => {
                let _ = writeln!(out, "{prefix}{branch}{}", describe_leaf(&leaf.get_value()));
            }
            Operand::Set(set) => {
                let _ = writeln!(out, "{prefix}{branch}{}", set.operator().token());
                let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
                render_operands(set, &child_prefix, out);
            }
        }
    }
}
