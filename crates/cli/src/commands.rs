use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;
use tracing::debug;

use tempo_core::{EditorConfig, Expression, LeafRule, Operator, OperatorNode};
use tempo_editor::codec::{self, Decoder};
use tempo_editor::validation::{self, ValidationResult};
use tempo_editor::{
    BoundEditor, HiddenInput, LeafControl, NodePath, Repeats, ScheduleWidget, TimeSegment,
};

/// One `--op` argument of `tempo edit`.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    AddLeaf { at: NodePath, rule: Option<LeafRule> },
    AddSet { at: NodePath, node: Option<OperatorNode> },
    Remove { path: NodePath },
    Operator { path: NodePath, operator: Operator },
    Set { path: NodePath, control: LeafControl, text: String },
}

impl FromStr for EditOp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (verb, rest) = split_word(s);
        let (path, rest) = split_word(rest);
        if path.is_empty() {
            bail!("'{verb}' needs a node path, e.g. '/' or '/0/1'");
        }
        let path: NodePath = path.parse()?;

        let op = match verb {
            "add-leaf" => EditOp::AddLeaf {
                at: path,
                rule: optional_json(rest)?
                    .map(|value| leaf_from_json(&value))
                    .transpose()?,
            },
            "add-set" => EditOp::AddSet {
                at: path,
                node: optional_json(rest)?
                    .map(|value| codec::decode(&value))
                    .transpose()?,
            },
            "remove" => EditOp::Remove { path },
            "operator" => {
                let token = rest.trim();
                let operator = Operator::from_token(token)
                    .ok_or_else(|| anyhow!("unknown operator '{token}', expected AND, OR or NOT"))?;
                EditOp::Operator { path, operator }
            }
            "set" => {
                let (control, text) = split_word(rest);
                EditOp::Set {
                    path,
                    control: control.parse()?,
                    text: text.to_string(),
                }
            }
            other => bail!(
                "unknown edit operation '{other}', expected add-leaf, add-set, remove, operator or set"
            ),
        };
        Ok(op)
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

fn optional_json(text: &str) -> Result<Option<Value>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let value = serde_json::from_str(text).with_context(|| format!("invalid JSON '{text}'"))?;
    Ok(Some(value))
}

fn leaf_from_json(value: &Value) -> Result<LeafRule> {
    match codec::decode_expression(value)? {
        Expression::Leaf(rule) => Ok(rule),
        Expression::Operator(_) => bail!("expected a leaf [from, to, unit, recurrence], got {value}"),
    }
}

/// Apply one operation to an attached editor.
pub fn apply(editor: &mut BoundEditor<HiddenInput>, op: &EditOp) -> Result<()> {
    debug!(?op, "applying edit");
    match op {
        EditOp::AddLeaf { at, rule } => {
            editor.add_leaf(at, *rule)?;
        }
        EditOp::AddSet { at, node } => {
            editor.add_operator_node(at, node.as_ref())?;
        }
        EditOp::Remove { path } => {
            editor.remove(path)?;
        }
        EditOp::Operator { path, operator } => editor.set_operator(path, *operator)?,
        EditOp::Set { path, control, text } => {
            editor.edit_leaf(path, *control, text)?;
        }
    }
    Ok(())
}

/// The value a fresh editor writes into an empty field.
pub fn new_expression(config: &EditorConfig) -> Result<String> {
    let editor = BoundEditor::attach(HiddenInput::new(), config)?;
    Ok(editor.value().to_string())
}

pub fn show(raw: &str, config: &EditorConfig) -> Result<String> {
    let editor = BoundEditor::attach(HiddenInput::with_value(raw), config)
        .context("failed to read expression")?;
    Ok(editor.render())
}

pub fn format(raw: &str, config: &EditorConfig) -> Result<String> {
    let node = Decoder::new(config.default_leaf())
        .parse(raw)
        .context("failed to read expression")?;
    Ok(codec::to_json(&node))
}

/// Expressions are arrays and schedules are objects; the first
/// non-blank character decides which validator runs.
pub fn validate(raw: &str, config: &EditorConfig) -> ValidationResult {
    if raw.trim_start().starts_with('{') {
        validation::validate_schedule_json(raw)
    } else {
        validation::validate_json(raw, config)
    }
}

pub fn edit(raw: &str, ops: &[String], config: &EditorConfig) -> Result<String> {
    let parsed = ops
        .iter()
        .map(|op| op.parse::<EditOp>().with_context(|| format!("bad --op '{op}'")))
        .collect::<Result<Vec<_>>>()?;

    let mut editor = BoundEditor::attach(HiddenInput::with_value(raw), config)
        .context("failed to read expression")?;
    for (op, text) in parsed.iter().zip(ops) {
        apply(&mut editor, op).with_context(|| format!("edit '{text}' failed"))?;
    }
    Ok(editor.value().to_string())
}

/// Arguments of `tempo schedule`.
#[derive(Debug, Default)]
pub struct ScheduleEdits {
    pub repeats: Option<String>,
    pub add_segments: Vec<String>,
    pub remove_segments: Vec<usize>,
    pub repeat_on: Option<String>,
}

/// Parse `"WEEKDAY FROM TO"`.
pub fn parse_segment(text: &str) -> Result<TimeSegment> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [weekday, from, to] = parts.as_slice() else {
        bail!("segment must be 'WEEKDAY FROM TO', got '{text}'");
    };
    let weekday: u8 = weekday
        .parse()
        .with_context(|| format!("weekday must be 1..=7, got '{weekday}'"))?;
    let from: f64 = from.parse().with_context(|| format!("bad time '{from}'"))?;
    let to: f64 = to.parse().with_context(|| format!("bad time '{to}'"))?;
    Ok(TimeSegment::new(weekday, from, to)?)
}

/// Apply in order: mode switch, segment additions, removals, repeat-on day.
pub fn schedule(raw: &str, edits: &ScheduleEdits, config: &EditorConfig) -> Result<String> {
    let mut widget = ScheduleWidget::attach(HiddenInput::with_value(raw), config)
        .context("failed to read schedule")?;

    if let Some(repeats) = &edits.repeats {
        let repeats: Repeats = repeats.parse()?;
        if repeats != widget.repeats() {
            widget.set_repeats(repeats);
        }
    }
    for text in &edits.add_segments {
        let segment = parse_segment(text)?;
        widget.add_segment(Some(segment))?;
    }
    for &index in &edits.remove_segments {
        widget
            .remove_segment(index)
            .with_context(|| format!("cannot remove segment {index}"))?;
    }
    if let Some(day) = &edits.repeat_on {
        widget.set_repeat_on_text(day)?;
    }
    Ok(widget.value().to_string())
}

/// Re-indent a JSON value when `pretty` is set.
pub fn output_json(value: &str, pretty: bool) -> Result<String> {
    if !pretty || value.is_empty() {
        return Ok(value.to_string());
    }
    let parsed: Value = serde_json::from_str(value)?;
    Ok(serde_json::to_string_pretty(&parsed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempo_core::TimeUnit;

    fn ops(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_edit_ops() {
        let op: EditOp = r#"add-leaf /0 [3,4,"minute","week"]"#.parse().unwrap();
        assert_eq!(
            op,
            EditOp::AddLeaf {
                at: "/0".parse().unwrap(),
                rule: Some(LeafRule::new(3.0, 4.0, TimeUnit::Minute, TimeUnit::Week)),
            }
        );

        let op: EditOp = "set /1 to 12.5".parse().unwrap();
        assert!(matches!(op, EditOp::Set { control: LeafControl::To, ref text, .. } if text == "12.5"));

        let op: EditOp = "operator / not".parse().unwrap();
        assert!(matches!(op, EditOp::Operator { operator: Operator::Not, .. }));

        assert!("add-leaf".parse::<EditOp>().is_err());
        assert!("rename / x".parse::<EditOp>().is_err());
        assert!("operator / XOR".parse::<EditOp>().is_err());
        assert!(r#"add-leaf / ["AND"]"#.parse::<EditOp>().is_err());
    }

    #[test]
    fn test_new_and_format() {
        let config = EditorConfig::default();
        assert_eq!(new_expression(&config).unwrap(), r#"["OR",[10,12,"hour","day"]]"#);
        assert_eq!(
            format(r#"["and", [1.0, "2", "hour", null]]"#, &config).unwrap(),
            r#"["AND",[1,2,"hour","null"]]"#
        );
        assert!(format(r#"["XOR"]"#, &config).is_err());
    }

    #[test]
    fn test_edit_adds_then_removes() {
        let config = EditorConfig::default();
        let raw = r#"["AND",[1,2,"hour","day"]]"#;

        let added = edit(raw, &ops(&[r#"add-leaf / [3,4,"minute","week"]"#]), &config).unwrap();
        assert_eq!(added, r#"["AND",[1,2,"hour","day"],[3,4,"minute","week"]]"#);

        let removed = edit(&added, &ops(&["remove /0"]), &config).unwrap();
        assert_eq!(removed, r#"["AND",[3,4,"minute","week"]]"#);
    }

    #[test]
    fn test_edit_nested_set() {
        let config = EditorConfig::default();
        let value = edit(
            r#"["OR",[1,2,"hour","day"]]"#,
            &ops(&["add-set /", "set /1/0 unit minute", "operator /1 and"]),
            &config,
        )
        .unwrap();
        assert_eq!(value, r#"["OR",[1,2,"hour","day"],["AND",[10,12,"minute","day"]]]"#);

        let err = edit(&value, &ops(&["set /1/0 unit fortnite"]), &config).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown unit"));
    }

    #[test]
    fn test_schedule_commands() {
        let config = EditorConfig::default();
        let edits = ScheduleEdits {
            add_segments: vec!["3 9 17.5".to_string(), "5 8 9".to_string()],
            remove_segments: vec![2],
            ..ScheduleEdits::default()
        };
        assert_eq!(
            schedule("", &edits, &config).unwrap(),
            r#"{"repeats":"weekly","repeatOn":[{"weekday":1,"from":12,"to":23.5},{"weekday":3,"from":9,"to":17.5}]}"#
        );

        let not_last = ScheduleEdits {
            add_segments: vec!["3 9 17.5".to_string()],
            remove_segments: vec![0],
            ..ScheduleEdits::default()
        };
        let err = schedule("", &not_last, &config).unwrap_err();
        assert!(format!("{err:#}").contains("cannot remove segment 0"));

        let monthly = ScheduleEdits {
            repeats: Some("monthly".to_string()),
            repeat_on: Some("20".to_string()),
            ..ScheduleEdits::default()
        };
        assert_eq!(
            schedule("", &monthly, &config).unwrap(),
            r#"{"repeats":"monthly","repeatOn":20}"#
        );

        let sole = ScheduleEdits {
            remove_segments: vec![0],
            ..ScheduleEdits::default()
        };
        assert!(schedule("", &sole, &config).is_err());
        assert!(parse_segment("8 1 2").is_err());
        assert!(parse_segment("1 9").is_err());
    }

    #[test]
    fn test_validate_dispatch() {
        let config = EditorConfig::default();
        assert!(validate(r#"["OR",[1,2,"hour","day"]]"#, &config).valid);
        assert!(!validate(r#"["OR",[1,2,"day","hour"]]"#, &config).valid);
        assert!(!validate(r#" {"repeats":"monthly","repeatOn":40}"#, &config).valid);
    }

    #[test]
    fn test_output_json() {
        assert_eq!(output_json("[1]", false).unwrap(), "[1]");
        assert_eq!(output_json("[1]", true).unwrap(), "[\n  1\n]");
        assert_eq!(output_json("", true).unwrap(), "");
    }
}
