//! Weekly/monthly schedule widget.
//!
//! A flat sibling of the expression editor: a repeat-mode selector swaps
//! between a weekly list of time segments and a monthly day number.

mod segments;
mod views;
mod widget;


pub use self::segments::{Affordances, HalfHour, TimeSegment, TimeSegments, Weekday};
pub use self::views::{MonthlyView, Repeats, Schedule, ScheduleView, WeeklyView};
pub use self::widget::ScheduleWidget;
