//! Operator and time-unit vocabularies shared by every widget.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ── Operator ──────────────────────────────────────────────────

/// Boolean operator heading an operator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    /// Operators in the order the selector lists them.
    pub const ALL: [Operator; 3] = [Operator::And, Operator::Or, Operator::Not];

    /// Canonical uppercase wire token.
    pub fn token(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        }
    }

    /// Case-insensitive lookup. Returns `None` for anything that is not an operator token.
    pub fn from_token(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "AND" => Some(Operator::And),
            "OR" => Some(Operator::Or),
            "NOT" => Some(Operator::Not),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Operator::from_token(s).ok_or_else(|| format!("unknown operator: '{}'", s))
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ── TimeUnit ──────────────────────────────────────────────────

/// Unit of time a leaf rule is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
        TimeUnit::Month,
        TimeUnit::Year,
    ];

    /// Wire names, used for option lists and suggestions.
    pub const NAMES: [&'static str; 7] = ["second", "minute", "hour", "day", "week", "month", "year"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }

    /// Rank of the unit, second = 1 through year = 7.
    pub fn order(&self) -> u8 {
        match self {
            TimeUnit::Second => 1,
            TimeUnit::Minute => 2,
            TimeUnit::Hour => 3,
            TimeUnit::Day => 4,
            TimeUnit::Week => 5,
            TimeUnit::Month => 6,
            TimeUnit::Year => 7,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "second" => Ok(TimeUnit::Second),
            "minute" => Ok(TimeUnit::Minute),
            "hour" => Ok(TimeUnit::Hour),
            "day" => Ok(TimeUnit::Day),
            "week" => Ok(TimeUnit::Week),
            "month" => Ok(TimeUnit::Month),
            "year" => Ok(TimeUnit::Year),
            other => Err(format!("unknown time unit: '{}'", other)),
        }
    }
}

// ── Recurrence ────────────────────────────────────────────────

/// How often a leaf rule repeats.
///
/// `None` means the window is counted once from the beginning of time.
/// It is written as `"null"` and read from `"null"`, `"none"` or JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recurrence {
    Every(TimeUnit),
    None,
}

impl Recurrence {
    /// Wire token for "no recurrence".
    pub const NONE_TOKEN: &'static str = "null";

    /// Option values of the recurrence selector.
    pub const NAMES: [&'static str; 8] = [
        "second", "minute", "hour", "day", "week", "month", "year", "null",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Every(unit) => unit.as_str(),
            Recurrence::None => Self::NONE_TOKEN,
        }
    }

    pub fn unit(&self) -> Option<TimeUnit> {
        match self {
            Recurrence::Every(unit) => Some(*unit),
            Recurrence::None => None,
        }
    }
}

impl From<TimeUnit> for Recurrence {
    fn from(unit: TimeUnit) -> Self {
        Recurrence::Every(unit)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "null" | "none" => Ok(Recurrence::None),
            other => other
                .parse::<TimeUnit>()
                .map(Recurrence::Every)
                .map_err(|_| format!("unknown recurrence: '{}'", other)),
        }
    }
}

impl Serialize for Recurrence {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Recurrence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(Recurrence::None),
            Some(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_tokens_are_case_insensitive() {
        assert_eq!(Operator::from_token("and"), Some(Operator::And));
        assert_eq!(Operator::from_token("Or"), Some(Operator::Or));
        assert_eq!(Operator::from_token("NOT"), Some(Operator::Not));
        assert_eq!(Operator::from_token("XOR"), None);
        assert_eq!(Operator::Or.to_string(), "OR");
    }

    #[test]
    fn unit_order_is_strictly_increasing() {
        let orders: Vec<u8> = TimeUnit::ALL.iter().map(|u| u.order()).collect();
        assert!(orders.windows(2).all(|w| w[0] < w[1]));
        for (unit, name) in TimeUnit::ALL.iter().zip(TimeUnit::NAMES) {
            assert_eq!(unit.as_str(), name);
            assert_eq!(name.parse::<TimeUnit>().unwrap(), *unit);
        }
    }

    #[test]
    fn recurrence_accepts_null_and_none() {
        assert_eq!("null".parse::<Recurrence>().unwrap(), Recurrence::None);
        assert_eq!("none".parse::<Recurrence>().unwrap(), Recurrence::None);
        assert_eq!("week".parse::<Recurrence>().unwrap(), Recurrence::Every(TimeUnit::Week));
        assert!("fortnight".parse::<Recurrence>().is_err());

        let r: Recurrence = serde_json::from_str("null").unwrap();
        assert_eq!(r, Recurrence::None);
        assert_eq!(serde_json::to_string(&Recurrence::None).unwrap(), "\"null\"");
    }
}
