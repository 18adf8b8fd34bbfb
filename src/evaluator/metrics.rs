//! Raw objective values for a schedule.
//!
//! "Consecutive" always means adjacent within a single weekday, ordered by
//! start time. Nothing carries over from one day to the next.

use crate::data::{DistanceTable, Schedule};
use crate::error::EvaluationError;
use log::trace;

/// Stand-in average when no instructor in the schedule has a rating.
/// Midpoint of the 1.0 to 5.0 scale.
pub const NEUTRAL_QUALITY: f64 = 3.0;

/// Mean rating of the rated instructors in the schedule.
///
/// Unrated instructors are left out of the average. If nobody is rated
/// (including the empty schedule) the result is [`NEUTRAL_QUALITY`].
pub fn average_professor_quality(schedule: &Schedule) -> f64 {
    let ratings: Vec<f64> = schedule
        .sections
        .iter()
        .filter_map(|s| s.instructor().quality)
        .collect();

    if ratings.is_empty() {
        return NEUTRAL_QUALITY;
    }
    ratings.iter().sum::<f64>() / ratings.len() as f64
}

/// Longest walk between two back-to-back classes on the same day.
///
/// Fails if the table has no entry for a pair of buildings the student
/// actually has to walk between.
pub fn max_distance(
    schedule: &Schedule,
    distances: &DistanceTable,
) -> Result<f64, EvaluationError> {
    let mut max = 0.0_f64;
    for (day, sections) in schedule.sections_by_day() {
        for pair in sections.windows(2) {
            let (from, to) = (pair[0].building(), pair[1].building());
            let d = distances.distance_between(from, to)?;
            trace!("{:?}: {} -> {} = {}", day, from, to, d);
            max = max.max(d);
        }
    }
    Ok(max)
}

/// Mean gap in minutes between consecutive classes, over every day.
/// Zero when no day has two classes.
pub fn average_idle_time(schedule: &Schedule) -> f64 {
    let gaps: Vec<u16> = schedule
        .sections_by_day()
        .values()
        .flat_map(|sections| {
            sections
                .windows(2)
                // overlapping classes leave no gap
                .map(|pair| {
                    pair[1]
                        .start()
                        .minutes()
                        .saturating_sub(pair[0].end().minutes())
                })
                .collect::<Vec<_>>()
        })
        .collect();

    if gaps.is_empty() {
        return 0.0;
    }
    gaps.iter().map(|&g| f64::from(g)).sum::<f64>() / gaps.len() as f64
}
