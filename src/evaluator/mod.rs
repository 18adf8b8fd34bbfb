//! Schedule scoring engine.
//!
//! All functions are pure: they read the schedule, the distance table and
//! the weights and return a value. Safe to call from any number of threads
//! on shared inputs.

mod metrics;
mod normalize;
mod objective;
mod validation;

pub use metrics::{average_idle_time, average_professor_quality, max_distance, NEUTRAL_QUALITY};
pub use normalize::{normalize, MetricRange, DISTANCE_RANGE, IDLE_TIME_RANGE, QUALITY_RANGE};
pub use objective::{compute_overall_objective, evaluate, ScoreBreakdown};
pub use validation::{find_conflicts, validate, Conflict};
