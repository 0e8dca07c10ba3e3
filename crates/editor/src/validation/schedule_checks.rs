//! Schedule checks: segment ordering, day-of-month range, repeated weekdays.

use std::collections::HashSet;

use crate::schedule::{Schedule, TimeSegment};

use super::ValidationResult;

pub(super) fn validate_schedule(schedule: &Schedule, result: &mut ValidationResult) {
    match schedule {
        Schedule::Weekly(segments) => validate_segments(segments, result),
        Schedule::Monthly(day) => {
            if !(1..=31).contains(day) {
                result.error(
                    "repeatOn",
                    format!("Day of month must be between 1 and 31, got {day}"),
                );
            }
        }
    }
}

fn validate_segments(segments: &[TimeSegment], result: &mut ValidationResult) {
    if segments.is_empty() {
        result.warn("repeatOn", "Weekly schedule has no segments");
    }

    let mut seen = HashSet::new();
    for (i, segment) in segments.iter().enumerate() {
        if segment.from > segment.to {
            result.error(
                format!("repeatOn.{i}"),
                format!(
                    "Segment starts at {} but ends at {}",
                    segment.from.label(),
                    segment.to.label()
                ),
            );
        }
        if !seen.insert(segment.weekday) {
            result.warn(
                format!("repeatOn.{i}.weekday"),
                format!("{} is scheduled more than once", segment.weekday.label()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::schedule::{Schedule, TimeSegment};
    use crate::validation::{validate_schedule, validate_schedule_json};

    #[test]
    fn default_weekly_is_valid() {
        let result = validate_schedule_json(
            r#"{"repeats":"weekly","repeatOn":[{"weekday":1,"from":12,"to":23.5}]}"#,
        );
        assert!(result.valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn inverted_segment_is_an_error() {
        let schedule = Schedule::Weekly(vec![TimeSegment::new(2, 18.0, 9.0).unwrap()]);
        let result = validate_schedule(&schedule);
        assert!(!result.valid);
        assert_eq!(result.errors[0].path, "repeatOn.0");
        assert!(result.errors[0].message.contains("6:00 pm"));
    }

    #[test]
    fn repeated_weekday_warns() {
        let schedule = Schedule::Weekly(vec![
            TimeSegment::new(3, 8.0, 9.0).unwrap(),
            TimeSegment::new(3, 14.0, 15.5).unwrap(),
        ]);
        let result = validate_schedule(&schedule);
        assert!(result.valid);
        assert_eq!(result.warnings[0].path, "repeatOn.1.weekday");
        assert!(result.warnings[0].message.starts_with("Wed"));
    }

    #[test]
    fn day_of_month_range() {
        assert!(validate_schedule(&Schedule::Monthly(31)).valid);
        assert!(!validate_schedule(&Schedule::Monthly(0)).valid);
        assert!(!validate_schedule(&Schedule::Monthly(32)).valid);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let result = validate_schedule_json(r#"{"repeats":"weekly","repeatOn":[{"weekday":9,"from":1,"to":2}]}"#);
        assert!(!result.valid);
        assert_eq!(result.errors[0].path, "$");
    }
}
