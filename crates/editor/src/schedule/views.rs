//! Weekly and monthly views and the value they serialize to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tempo_core::config::ScheduleDefaults;
use tempo_core::{Result, TempoError};

use super::segments::{HalfHour, TimeSegment, TimeSegments, Weekday};

/// Repeat mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeats {
    Weekly,
    Monthly,
}

impl Repeats {
    pub fn as_str(&self) -> &'static str {
        match self {
            Repeats::Weekly => "weekly",
            Repeats::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Repeats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Repeats {
    type Err = TempoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Repeats::Weekly),
            "monthly" => Ok(Repeats::Monthly),
            other => Err(TempoError::Schedule(format!(
                "repeats must be 'weekly' or 'monthly', got '{other}'"
            ))),
        }
    }
}

/// Serialized schedule: `{"repeats": ..., "repeatOn": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "repeats", content = "repeatOn", rename_all = "lowercase")]
pub enum Schedule {
    Weekly(Vec<TimeSegment>),
    Monthly(u32),
}

impl Schedule {
    pub fn repeats(&self) -> Repeats {
        match self {
            Schedule::Weekly(_) => Repeats::Weekly,
            Schedule::Monthly(_) => Repeats::Monthly,
        }
    }

    /// The schedule a fresh widget starts with: one weekly segment.
    pub fn default_for(defaults: &ScheduleDefaults) -> Self {
        Schedule::Weekly(vec![default_segment(defaults)])
    }
}

/// Segment used when the weekly view is (re)rendered.
pub(crate) fn default_segment(defaults: &ScheduleDefaults) -> TimeSegment {
    let weekday = Weekday::new(defaults.weekday).unwrap_or(Weekday::MONDAY);
    let from = HalfHour::from_hours(defaults.from).unwrap_or(HalfHour::NOON);
    let to = HalfHour::from_hours(defaults.to).unwrap_or(HalfHour::LAST);
    TimeSegment { weekday, from, to }
}

/// Weekly view: a list of segments that always keeps at least one row.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyView {
    segments: TimeSegments,
    default_segment: TimeSegment,
}

impl WeeklyView {
    /// Rendered view: one default segment.
    pub fn new(default_segment: TimeSegment) -> Self {
        let mut segments = TimeSegments::new();
        segments.add(default_segment);
        Self {
            segments,
            default_segment,
        }
    }

    pub fn segments(&self) -> &TimeSegments {
        &self.segments
    }

    pub fn segments_mut(&mut self) -> &mut TimeSegments {
        &mut self.segments
    }

    /// Append a segment, the default one when `None`.
    pub fn add_segment(&mut self, segment: Option<TimeSegment>) -> usize {
        self.segments.add(segment.unwrap_or(self.default_segment))
    }

    /// Replace every row. An empty list leaves one default row.
    pub fn set_value(&mut self, segments: &[TimeSegment]) {
        self.segments.clear();
        for segment in segments {
            self.segments.add(*segment);
        }
        if self.segments.is_empty() {
            self.segments.add(self.default_segment);
        }
    }

    pub fn get_value(&self) -> Schedule {
        Schedule::Weekly(self.segments.segments().to_vec())
    }
}

/// Monthly view: a single day of month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyView {
    repeat_on: u32,
}

impl MonthlyView {
    pub fn new(repeat_on: u32) -> Self {
        Self { repeat_on }
    }

    pub fn repeat_on(&self) -> u32 {
        self.repeat_on
    }

    pub fn set_repeat_on(&mut self, day: u32) {
        self.repeat_on = day;
    }

    /// Parse the text input. Range is checked by validation, not here.
    pub fn set_repeat_on_text(&mut self, text: &str) -> Result<()> {
        self.repeat_on = text.trim().parse().map_err(|_| {
            TempoError::Schedule(format!("repeat-on must be a day number, got '{text}'"))
        })?;
        Ok(())
    }

    pub fn get_value(&self) -> Schedule {
        Schedule::Monthly(self.repeat_on)
    }
}

/// Whichever view the repeat selector currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleView {
    Weekly(WeeklyView),
    Monthly(MonthlyView),
}

impl ScheduleView {
    /// Fresh view for a repeat mode.
    pub fn render(repeats: Repeats, defaults: &ScheduleDefaults) -> Self {
        match repeats {
            Repeats::Weekly => ScheduleView::Weekly(WeeklyView::new(default_segment(defaults))),
            Repeats::Monthly => ScheduleView::Monthly(MonthlyView::new(defaults.repeat_on)),
        }
    }

    /// View holding `schedule`.
    pub fn from_schedule(schedule: &Schedule, defaults: &ScheduleDefaults) -> Self {
        let mut view = Self::render(schedule.repeats(), defaults);
        match (&mut view, schedule) {
            (ScheduleView::Weekly(weekly), Schedule::Weekly(segments)) => weekly.set_value(segments),
            (ScheduleView::Monthly(monthly), Schedule::Monthly(day)) => monthly.set_repeat_on(*day),
            _ => {}
        }
        view
    }

    pub fn repeats(&self) -> Repeats {
        match self {
            ScheduleView::Weekly(_) => Repeats::Weekly,
            ScheduleView::Monthly(_) => Repeats::Monthly,
        }
    }

    pub fn get_value(&self) -> Schedule {
        match self {
            ScheduleView::Weekly(weekly) => weekly.get_value(),
            ScheduleView::Monthly(monthly) => monthly.get_value(),
        }
    }
}
