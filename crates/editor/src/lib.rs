//! Recurrence expression editor and weekly/monthly schedule widget.
//!
//! This crate provides:
//! - The JSON array wire codec for AND/OR/NOT expression trees
//! - An owned editor tree bound to a form field, re-serialized on every edit
//! - The flat weekly/monthly schedule widget
//! - Advisory validation with "did you mean" suggestions

pub mod codec;
pub mod editor;
pub mod field;
pub mod path;
pub mod schedule;
pub mod validation;

pub use editor::{BoundEditor, ExpressionTreeEditor, LeafControl, LeafRuleEditor, Operand};
pub use field::{BoundField, ChangeEvent, HiddenInput};
pub use path::NodePath;
pub use schedule::{Repeats, Schedule, ScheduleWidget, TimeSegment};
