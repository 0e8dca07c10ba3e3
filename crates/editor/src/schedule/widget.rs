//! Flat weekly/monthly widget bound to a form field.

use tracing::{debug, info};
use uuid::Uuid;

use tempo_core::config::ScheduleDefaults;
use tempo_core::{EditorConfig, Result, TempoError};

use super::segments::{Affordances, TimeSegment};
use super::views::{MonthlyView, Repeats, Schedule, ScheduleView, WeeklyView};
use crate::field::BoundField;

/// Weekly/monthly schedule widget.
///
/// Every interaction rewrites the bound field with the current
/// `{"repeats", "repeatOn"}` value and emits a change notification.
pub struct ScheduleWidget<F: BoundField> {
    field: F,
    view: ScheduleView,
    defaults: ScheduleDefaults,
    widget_id: Uuid,
}

impl<F: BoundField> ScheduleWidget<F> {
    /// Attach to `field`. An empty value starts with one default weekly segment.
    pub fn attach(field: F, config: &EditorConfig) -> Result<Self> {
        let defaults = config.schedule.clone();
        let raw = field.value().trim();
        let schedule = if raw.is_empty() {
            Schedule::default_for(&defaults)
        } else {
            serde_json::from_str(raw)?
        };
        Ok(Self::from_schedule(field, &schedule, config))
    }

    /// Attach to `field`, replacing its value with `schedule`.
    pub fn from_schedule(field: F, schedule: &Schedule, config: &EditorConfig) -> Self {
        let defaults = config.schedule.clone();
        let mut widget = Self {
            field,
            view: ScheduleView::from_schedule(schedule, &defaults),
            defaults,
            widget_id: Uuid::new_v4(),
        };
        info!(widget = %widget.widget_id, repeats = %widget.repeats(), "schedule widget attached");
        widget.sync();
        widget
    }

    pub fn widget_id(&self) -> Uuid {
        self.widget_id
    }

    pub fn repeats(&self) -> Repeats {
        self.view.repeats()
    }

    pub fn view(&self) -> &ScheduleView {
        &self.view
    }

    pub fn schedule(&self) -> Schedule {
        self.view.get_value()
    }

    pub fn value(&self) -> &str {
        self.field.value()
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    /// Switch repeat mode. The new view starts from its defaults.
    pub fn set_repeats(&mut self, repeats: Repeats) {
        self.view = ScheduleView::render(repeats, &self.defaults);
        self.sync();
    }

    /// Append a weekly segment (the default one when `None`), returning its index.
    pub fn add_segment(&mut self, segment: Option<TimeSegment>) -> Result<usize> {
        let index = self.weekly_mut()?.add_segment(segment);
        self.sync();
        Ok(index)
    }

    pub fn remove_segment(&mut self, index: usize) -> Result<TimeSegment> {
        let removed = self.weekly_mut()?.segments_mut().remove(index)?;
        self.sync();
        Ok(removed)
    }

    pub fn set_segment(&mut self, index: usize, segment: TimeSegment) -> Result<()> {
        self.weekly_mut()?.segments_mut().set(index, segment)?;
        self.sync();
        Ok(())
    }

    /// Affordances of a weekly segment row; `None` in monthly mode or out of range.
    pub fn affordances(&self, index: usize) -> Option<Affordances> {
        match &self.view {
            ScheduleView::Weekly(weekly) => weekly.segments().affordances(index),
            ScheduleView::Monthly(_) => None,
        }
    }

    pub fn set_repeat_on(&mut self, day: u32) -> Result<()> {
        self.monthly_mut()?.set_repeat_on(day);
        self.sync();
        Ok(())
    }

    pub fn set_repeat_on_text(&mut self, text: &str) -> Result<()> {
        self.monthly_mut()?.set_repeat_on_text(text)?;
        self.sync();
        Ok(())
    }

    /// Drop the view, reset the field to `""` and hand it back.
    pub fn destroy(mut self) -> F {
        info!(widget = %self.widget_id, "schedule widget destroyed");
        self.field.set_value(String::new());
        self.field.emit_change();
        self.field
    }

    fn weekly_mut(&mut self) -> Result<&mut WeeklyView> {
        match &mut self.view {
            ScheduleView::Weekly(weekly) => Ok(weekly),
            ScheduleView::Monthly(_) => Err(TempoError::Schedule(
                "segments are only available in weekly mode".to_string(),
            )),
        }
    }

    fn monthly_mut(&mut self) -> Result<&mut MonthlyView> {
        match &mut self.view {
            ScheduleView::Monthly(monthly) => Ok(monthly),
            ScheduleView::Weekly(_) => Err(TempoError::Schedule(
                "repeat-on day is only available in monthly mode".to_string(),
            )),
        }
    }

    fn sync(&mut self) {
        // Schedule holds only integers and half hours; serializing cannot fail.
        let json = serde_json::to_string(&self.view.get_value()).unwrap_or_default();
        debug!(widget = %self.widget_id, value = %json, "bound field synchronized");
        self.field.set_value(json);
        self.field.emit_change();
    }
}
