//! Multi-objective scoring for student class schedules.
//!
//! A schedule is judged on instructor quality, the longest walk between
//! back-to-back classes and the average idle time between classes. Each
//! objective is min-max normalized against fixed bounds and the three are
//! combined with caller-supplied weights into one score in [0, 1].
//!
//! The [`evaluator`] module is the engine. [`server`] exposes it over HTTP.

pub mod config;
pub mod data;
pub mod error;
pub mod evaluator;
pub mod server;

pub use data::{ClassSection, DistanceTable, Instructor, Schedule, TimeOfDay, Weekday, Weights};
pub use error::EvaluationError;
