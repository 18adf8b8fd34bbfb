//! Weighted aggregation of the three objectives into one score.

use super::metrics::{average_idle_time, average_professor_quality, max_distance};
use super::normalize::{normalize, DISTANCE_RANGE, IDLE_TIME_RANGE, QUALITY_RANGE};
use crate::data::{DistanceTable, Schedule, Weights};
use crate::error::EvaluationError;
use log::debug;
use serde::Serialize;

/// Raw and normalized objective values plus the combined score.
///
/// The normalized distance and idle time are reported as-is; the score
/// uses their complements since less of either is better.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub average_professor_quality: f64,
    pub max_distance: f64,
    pub average_idle_time: f64,
    pub normalized_quality: f64,
    pub normalized_distance: f64,
    pub normalized_idle_time: f64,
    /// Overall objective in [0, 1], higher is better.
    pub score: f64,
}

/// Scores a schedule with already-validated weights.
///
/// Does not check for time conflicts; the score of a conflicting schedule
/// is meaningless and callers should run [`validate`](super::validate) first.
pub fn evaluate(
    schedule: &Schedule,
    distances: &DistanceTable,
    weights: &Weights,
) -> Result<ScoreBreakdown, EvaluationError> {
    let quality = average_professor_quality(schedule);
    let distance = max_distance(schedule, distances)?;
    let idle_time = average_idle_time(schedule);

    let normalized_quality = normalize(quality, QUALITY_RANGE);
    let normalized_distance = normalize(distance, DISTANCE_RANGE);
    let normalized_idle_time = normalize(idle_time, IDLE_TIME_RANGE);

    let score = weights.quality() * normalized_quality
        + weights.distance() * (1.0 - normalized_distance)
        + weights.idle_time() * (1.0 - normalized_idle_time);

    debug!(
        "Scored {} sections: quality={:.2} distance={:.2} idle={:.1}min -> {:.4}",
        schedule.len(),
        quality,
        distance,
        idle_time,
        score
    );

    Ok(ScoreBreakdown {
        average_professor_quality: quality,
        max_distance: distance,
        average_idle_time: idle_time,
        normalized_quality,
        normalized_distance,
        normalized_idle_time,
        score,
    })
}

/// Overall objective for a schedule.
///
/// `weights` are for instructor quality, max distance and average idle
/// time, in that order. They must be three non-negative numbers adding up
/// to 1 (within 1e-6); this is checked before anything is computed.
pub fn compute_overall_objective(
    schedule: &Schedule,
    distances: &DistanceTable,
    weights: &[f64],
) -> Result<f64, EvaluationError> {
    let weights = Weights::new(weights)?;
    Ok(evaluate(schedule, distances, &weights)?.score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClassSection, Instructor, TimeOfDay, Weekday};
    use proptest::prelude::*;
    use Weekday::*;

    fn class(id: &str, start: u16, end: u16, building: &str, quality: f64) -> ClassSection {
        ClassSection::new(
            id,
            &[Mon, Wed],
            TimeOfDay::from_minutes(start),
            TimeOfDay::from_minutes(end),
            building,
            Instructor::rated(format!("{id} instructor"), quality),
        )
        .unwrap()
    }

    fn campus() -> DistanceTable {
        DistanceTable::new()
            .with_distance("Boyd", "Park", 6.0)
            .with_distance("Boyd", "Tate", 45.0)
    }

    #[test]
    fn test_single_class_score() {
        let schedule = Schedule::new().with_section(class("CSCI1301", 540, 600, "Boyd", 4.0));
        let score =
            compute_overall_objective(&schedule, &DistanceTable::new(), &[0.5, 0.3, 0.2]).unwrap();
        assert!((score - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_breakdown_values() {
        // 9:00-10:00 Boyd, 11:00-12:00 Park: 60 min gap, 6.0 walk, on Mon and Wed
        let schedule = Schedule::new()
            .with_section(class("A", 540, 600, "Boyd", 5.0))
            .with_section(class("B", 660, 720, "Park", 3.0));
        let weights = Weights::new(&[0.4, 0.4, 0.2]).unwrap();

        let b = evaluate(&schedule, &campus(), &weights).unwrap();
        assert!((b.average_professor_quality - 4.0).abs() < 1e-12);
        assert_eq!(b.max_distance, 6.0);
        assert!((b.average_idle_time - 60.0).abs() < 1e-12);
        assert!((b.normalized_quality - 0.75).abs() < 1e-12);
        assert!((b.normalized_distance - 0.2).abs() < 1e-12);
        let expected = 0.4 * 0.75 + 0.4 * 0.8 + 0.2 * (1.0 - 60.0 / 780.0);
        assert!((b.score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_distance_outlier_is_clipped() {
        let schedule = Schedule::new()
            .with_section(class("A", 540, 600, "Boyd", 1.0))
            .with_section(class("B", 600, 660, "Tate", 1.0));
        let distance_only = Weights::new(&[0.0, 1.0, 0.0]).unwrap();
        let b = evaluate(&schedule, &campus(), &distance_only).unwrap();
        assert_eq!(b.max_distance, 45.0);
        assert_eq!(b.normalized_distance, 1.0);
        assert_eq!(b.score, 0.0);
    }

    #[test]
    fn test_weights_checked_first() {
        // missing distance would also fail, but weights are rejected first
        let schedule = Schedule::new()
            .with_section(class("A", 540, 600, "Boyd", 4.0))
            .with_section(class("B", 600, 660, "Sanford", 4.0));
        let table = DistanceTable::new();

        assert_eq!(
            compute_overall_objective(&schedule, &table, &[0.5, 0.5]),
            Err(EvaluationError::WrongWeightCount(2))
        );
        assert!(matches!(
            compute_overall_objective(&schedule, &table, &[0.5, 0.5, 0.5]),
            Err(EvaluationError::WeightSumNotOne(_))
        ));
        assert!(matches!(
            compute_overall_objective(&schedule, &table, &[0.5, 0.3, 0.2]),
            Err(EvaluationError::MissingDistance { .. })
        ));
    }

    #[test]
    fn test_empty_schedule_score() {
        // neutral quality 3.0 -> 0.5
        let weights = [0.5, 0.25, 0.25];
        let score =
            compute_overall_objective(&Schedule::new(), &DistanceTable::new(), &weights).unwrap();
        assert!((score - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_nan_inputs_never_reach_the_score() {
        let nan_rated = ClassSection::new(
            "CSCI1301",
            &[Mon],
            TimeOfDay::from_hm(9, 0),
            TimeOfDay::from_hm(10, 0),
            "Boyd",
            Instructor::rated("x", f64::NAN),
        );
        assert!(matches!(nan_rated, Err(EvaluationError::InvalidRating { .. })));

        let schedule = Schedule::new()
            .with_section(class("A", 540, 600, "Boyd", 4.0))
            .with_section(class("B", 660, 720, "Park", 4.0));
        let table = DistanceTable::new().with_distance("Park", "Boyd", f64::NAN);
        assert!(matches!(
            compute_overall_objective(&schedule, &table, &[0.5, 0.3, 0.2]),
            Err(EvaluationError::InvalidDistance { .. })
        ));
    }

    fn weights_strategy() -> impl Strategy<Value = Weights> {
        (0.0..1.0f64, 0.0..1.0f64).prop_map(|(a, b)| {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            Weights::new(&[lo, hi - lo, 1.0 - hi]).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_score_bounded(
            weights in weights_strategy(),
            q1 in 0.0..6.0f64,
            q2 in 0.0..6.0f64,
            gap in 0u16..900,
        ) {
            let schedule = Schedule::new()
                .with_section(class("A", 480, 540, "Boyd", q1))
                .with_section(class("B", 540 + gap, 600 + gap, "Tate", q2));
            let score = evaluate(&schedule, &campus(), &weights).unwrap().score;
            prop_assert!((-1e-9..=1.0 + 1e-9).contains(&score));
        }

        #[test]
        fn prop_score_monotonic_in_quality(
            weights in weights_strategy(),
            q in 1.0..5.0f64,
            bump in 0.0..2.0f64,
        ) {
            let base = Schedule::new().with_section(class("A", 480, 540, "Boyd", q));
            let better = Schedule::new().with_section(class("A", 480, 540, "Boyd", q + bump));
            let table = DistanceTable::new();
            prop_assert!(
                evaluate(&better, &table, &weights).unwrap().score
                    >= evaluate(&base, &table, &weights).unwrap().score
            );
        }

        #[test]
        fn prop_score_monotonic_in_idle_time(
            weights in weights_strategy(),
            gap in 0u16..600,
            extra in 0u16..300,
        ) {
            let schedule = |g: u16| {
                Schedule::new()
                    .with_section(class("A", 480, 540, "Boyd", 4.0))
                    .with_section(class("B", 540 + g, 600 + g, "Park", 4.0))
            };
            let tight = evaluate(&schedule(gap), &campus(), &weights).unwrap().score;
            let loose = evaluate(&schedule(gap + extra), &campus(), &weights).unwrap().score;
            prop_assert!(loose <= tight + 1e-12);
        }

        #[test]
        fn prop_score_monotonic_in_distance(
            weights in weights_strategy(),
            d in 0.0..40.0f64,
            extra in 0.0..20.0f64,
        ) {
            let schedule = Schedule::new()
                .with_section(class("A", 480, 540, "Boyd", 4.0))
                .with_section(class("B", 600, 660, "Park", 4.0));
            let near = DistanceTable::new().with_distance("Boyd", "Park", d);
            let far = DistanceTable::new().with_distance("Boyd", "Park", d + extra);
            prop_assert!(
                evaluate(&schedule, &far, &weights).unwrap().score
                    <= evaluate(&schedule, &near, &weights).unwrap().score + 1e-12
            );
        }
    }
}
