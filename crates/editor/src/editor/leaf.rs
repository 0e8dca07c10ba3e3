//! Editor for one leaf rule: two text inputs and two selects.

use std::fmt;
use std::str::FromStr;

use tempo_core::{LeafRule, Recurrence, Result, TempoError, TimeUnit};

use crate::codec::{parse_number, parse_recurrence, parse_unit};

/// The four controls of a leaf editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafControl {
    From,
    To,
    Unit,
    Recurrence,
}

impl LeafControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeafControl::From => "from",
            LeafControl::To => "to",
            LeafControl::Unit => "unit",
            LeafControl::Recurrence => "recurrence",
        }
    }
}

impl fmt::Display for LeafControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeafControl {
    type Err = TempoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "from" => Ok(LeafControl::From),
            "to" => Ok(LeafControl::To),
            "unit" => Ok(LeafControl::Unit),
            "recurrence" | "every" => Ok(LeafControl::Recurrence),
            other => Err(TempoError::InvalidPath(format!(
                "unknown leaf control '{other}', expected from, to, unit or recurrence"
            ))),
        }
    }
}

/// Live state of one leaf rule.
///
/// Bounds are kept as the text the user typed; they are only turned into
/// numbers when the value is read, so bad input shows up as NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafRuleEditor {
    from: String,
    to: String,
    unit: TimeUnit,
    recurrence: Recurrence,
}

impl LeafRuleEditor {
    /// New editor; `None` starts from hours 10 to 12, every day.
    pub fn new(initial: Option<LeafRule>) -> Self {
        Self::from_rule(&initial.unwrap_or_default())
    }

    pub fn from_rule(rule: &LeafRule) -> Self {
        let mut editor = Self {
            from: String::new(),
            to: String::new(),
            unit: rule.unit,
            recurrence: rule.recurrence,
        };
        editor.set_value(rule);
        editor
    }

    /// Read the four controls. Unparseable bounds become NaN.
    pub fn get_value(&self) -> LeafRule {
        LeafRule {
            from: parse_number(&self.from),
            to: parse_number(&self.to),
            unit: self.unit,
            recurrence: self.recurrence,
        }
    }

    pub fn set_value(&mut self, rule: &LeafRule) {
        self.from = rule.from.to_string();
        self.to = rule.to.to_string();
        self.unit = rule.unit;
        self.recurrence = rule.recurrence;
    }

    /// Current text of a control.
    pub fn control(&self, control: LeafControl) -> String {
        match control {
            LeafControl::From => self.from.clone(),
            LeafControl::To => self.to.clone(),
            LeafControl::Unit => self.unit.to_string(),
            LeafControl::Recurrence => self.recurrence.to_string(),
        }
    }

    /// Type into a text input or pick a select option.
    ///
    /// Text inputs take anything. Selects only take their option values.
    pub fn set_control(&mut self, control: LeafControl, text: &str) -> Result<()> {
        match control {
            LeafControl::From => self.from = text.to_string(),
            LeafControl::To => self.to = text.to_string(),
            LeafControl::Unit => self.unit = parse_unit(text.trim())?,
            LeafControl::Recurrence => self.recurrence = parse_recurrence(text.trim())?,
        }
        Ok(())
    }

    /// Detach the editor, returning the value it last held.
    pub fn remove(self) -> LeafRule {
        self.get_value()
    }
}

impl Default for LeafRuleEditor {
    fn default() -> Self {
        Self::new(None)
    }
}
