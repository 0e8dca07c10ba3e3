//! Weekly time segments and their add/remove affordances.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use tempo_core::{Result, TempoError};

/// Day of week, 1 = Monday through 7 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weekday(u8);

impl Weekday {
    pub const MONDAY: Weekday = Weekday(1);

    pub const LABELS: [&'static str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

    pub fn new(day: u8) -> Result<Self> {
        if (1..=7).contains(&day) {
            Ok(Self(day))
        } else {
            Err(TempoError::Schedule(format!("weekday must be 1..=7, got {day}")))
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        Self::LABELS[(self.0 - 1) as usize]
    }
}

impl TryFrom<u8> for Weekday {
    type Error = TempoError;

    fn try_from(day: u8) -> Result<Self> {
        Self::new(day)
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.0
    }
}

/// Time of day quantized to half hours, 0.0 (midnight) through 23.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "f64")]
pub struct HalfHour(u8);

impl HalfHour {
    /// Number of selectable slots in a day.
    pub const SLOTS: u8 = 48;
    pub const MIDNIGHT: HalfHour = HalfHour(0);
    pub const NOON: HalfHour = HalfHour(24);
    /// 23:30, the latest selectable time.
    pub const LAST: HalfHour = HalfHour(47);

    pub fn from_hours(hours: f64) -> Result<Self> {
        let doubled = hours * 2.0;
        if !doubled.is_finite() || doubled.fract() != 0.0 || doubled < 0.0 || doubled >= Self::SLOTS as f64 {
            return Err(TempoError::Schedule(format!(
                "time must be a half hour between 0.0 and 23.5, got {hours}"
            )));
        }
        Ok(Self(doubled as u8))
    }

    pub fn hours(&self) -> f64 {
        self.0 as f64 / 2.0
    }

    /// Selector label, e.g. `12:00 pm (noon)` or `1:30 am`.
    pub fn label(&self) -> String {
        let hour = self.0 / 2;
        let minute = if self.0 % 2 == 0 { "00" } else { "30" };
        let suffix = if hour < 12 { "am" } else { "pm" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        match (hour, minute) {
            (0, "00") => "12:00 am (midnight)".to_string(),
            (12, "00") => "12:00 pm (noon)".to_string(),
            _ => format!("{display_hour}:{minute} {suffix}"),
        }
    }
}

impl TryFrom<f64> for HalfHour {
    type Error = TempoError;

    fn try_from(hours: f64) -> Result<Self> {
        Self::from_hours(hours)
    }
}

impl Serialize for HalfHour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.0 % 2 == 0 {
            serializer.serialize_u8(self.0 / 2)
        } else {
            serializer.serialize_f64(self.hours())
        }
    }
}

impl fmt::Display for HalfHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.hours())
    }
}

/// One weekly segment: a weekday and a from/to time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSegment {
    pub weekday: Weekday,
    pub from: HalfHour,
    pub to: HalfHour,
}

impl TimeSegment {
    pub fn new(weekday: u8, from: f64, to: f64) -> Result<Self> {
        Ok(Self {
            weekday: Weekday::new(weekday)?,
            from: HalfHour::from_hours(from)?,
            to: HalfHour::from_hours(to)?,
        })
    }
}

/// Which actions a segment row offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub add: bool,
    pub remove: bool,
}

/// Ordered list of weekly segments.
///
/// Affordances follow position: only the last segment offers "add", and
/// only the last segment offers "remove" while more than one exists.
/// Removing it hands both over to the new last segment. The sole
/// remaining segment can never be removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSegments {
    segments: Vec<TimeSegment>,
}

impl TimeSegments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[TimeSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment; it becomes the new last one and takes over "add".
    pub fn add(&mut self, segment: TimeSegment) -> usize {
        self.segments.push(segment);
        self.segments.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Result<TimeSegment> {
        if index >= self.segments.len() {
            return Err(TempoError::Segment(format!("no segment at index {index}")));
        }
        if self.segments.len() == 1 {
            return Err(TempoError::Segment(
                "the only remaining segment cannot be removed".to_string(),
            ));
        }
        if index + 1 != self.segments.len() {
            return Err(TempoError::Segment(format!(
                "only the last segment can be removed, not index {index}"
            )));
        }
        Ok(self.segments.remove(index))
    }

    pub fn set(&mut self, index: usize, segment: TimeSegment) -> Result<()> {
        let slot = self
            .segments
            .get_mut(index)
            .ok_or_else(|| TempoError::Segment(format!("no segment at index {index}")))?;
        *slot = segment;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn affordances(&self, index: usize) -> Option<Affordances> {
        let len = self.segments.len();
        (index < len).then(|| Affordances {
            add: index + 1 == len,
            remove: index + 1 == len && len > 1,
        })
    }
}
