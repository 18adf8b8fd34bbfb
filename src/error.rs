use crate::data::TimeOfDay;
use thiserror::Error;

/// Everything that can make a scoring call fail.
///
/// Degenerate schedules (empty, a single class, no consecutive pairs) are not
/// errors; the metrics return well-defined values for them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("Parameter '{0}' cannot be null")]
    MissingArgument(&'static str),

    #[error("Number of weights must be 3, got {0}")]
    WrongWeightCount(usize),

    #[error("Weight {index} must be a non-negative number, got {value}")]
    NegativeWeight { index: usize, value: f64 },

    #[error("The sum of the weights must be equal to 1, got {0}")]
    WeightSumNotOne(f64),

    #[error("Section '{course_id}' has an invalid time window {start}-{end}")]
    InvalidTimeWindow {
        course_id: String,
        start: TimeOfDay,
        end: TimeOfDay,
    },

    #[error("Instructor '{instructor}' has a rating that is not a number: {value}")]
    InvalidRating { instructor: String, value: f64 },

    #[error("No distance known between buildings '{from}' and '{to}'")]
    MissingDistance { from: String, to: String },

    #[error("Distance from '{from}' to '{to}' must be a non-negative number, got {value}")]
    InvalidDistance { from: String, to: String, value: f64 },
}

impl EvaluationError {
    /// True for malformed caller input, false for gaps in the campus data.
    pub fn is_caller_error(&self) -> bool {
        !matches!(
            self,
            EvaluationError::MissingDistance { .. } | EvaluationError::InvalidDistance { .. }
        )
    }
}
