//! Time-conflict detection.

use crate::data::{CourseId, Schedule, Weekday};
use itertools::Itertools;
use log::trace;
use serde::Serialize;

/// Two sections that are in session at the same time on at least one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub first: CourseId,
    pub second: CourseId,
    pub days: Vec<Weekday>,
}

/// Lists every conflicting pair in the schedule, in section order.
pub fn find_conflicts(schedule: &Schedule) -> Vec<Conflict> {
    schedule
        .sections
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.overlaps(b))
        .map(|(a, b)| Conflict {
            first: a.course_id().to_string(),
            second: b.course_id().to_string(),
            days: a.shared_days(b),
        })
        .collect()
}

/// True when no two classes overlap. Empty and single-class schedules are valid.
pub fn validate(schedule: &Schedule) -> bool {
    let valid = !schedule
        .sections
        .iter()
        .tuple_combinations()
        .any(|(a, b)| a.overlaps(b));
    trace!("Validated schedule with {} sections: {}", schedule.len(), valid);
    valid
}
