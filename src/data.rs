use crate::error::EvaluationError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub type CourseId = String;
pub type BuildingId = String;

/// Allowed drift of the weight sum away from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// A class has to end by midnight of the day it starts.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Number of objectives a weight vector covers.
pub const OBJECTIVE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

/// Wall-clock time as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_hm(hour: u16, minute: u16) -> Self {
        TimeOfDay(hour * 60 + minute)
    }

    pub fn from_minutes(minutes: u16) -> Self {
        TimeOfDay(minutes)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// The person teaching a section and their rating, if they have one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Instructor {
    pub name: String,
    /// Quality rating on the 1.0 (worst) to 5.0 (best) scale.
    #[serde(default)]
    pub quality: Option<f64>,
}

impl Instructor {
    pub fn rated(name: impl Into<String>, quality: f64) -> Self {
        Self {
            name: name.into(),
            quality: Some(quality),
        }
    }

    pub fn unrated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quality: None,
        }
    }
}

/// One class the student attends: when, where and with whom.
///
/// Only built through [`ClassSection::new`] (or deserialized through the
/// same checks), so the time window is never inverted and any rating is a
/// finite number.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", try_from = "RawClassSection")]
pub struct ClassSection {
    course_id: CourseId,
    days: Vec<Weekday>,
    start: TimeOfDay,
    end: TimeOfDay,
    building: BuildingId,
    instructor: Instructor,
}

/// Wire shape of a section before its time window and rating are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClassSection {
    course_id: CourseId,
    days: Vec<Weekday>,
    start: TimeOfDay,
    end: TimeOfDay,
    building: BuildingId,
    instructor: Instructor,
}

impl TryFrom<RawClassSection> for ClassSection {
    type Error = EvaluationError;

    fn try_from(raw: RawClassSection) -> Result<Self, Self::Error> {
        ClassSection::new(
            raw.course_id,
            &raw.days,
            raw.start,
            raw.end,
            raw.building,
            raw.instructor,
        )
    }
}

impl ClassSection {
    /// Fails if the class does not start before it ends within one day,
    /// or if the instructor's rating is NaN or infinite.
    pub fn new(
        course_id: impl Into<CourseId>,
        days: &[Weekday],
        start: TimeOfDay,
        end: TimeOfDay,
        building: impl Into<BuildingId>,
        instructor: Instructor,
    ) -> Result<Self, EvaluationError> {
        let course_id = course_id.into();
        if start >= end || end.minutes() > MINUTES_PER_DAY {
            return Err(EvaluationError::InvalidTimeWindow {
                course_id,
                start,
                end,
            });
        }
        if let Some(value) = instructor.quality.filter(|q| !q.is_finite()) {
            return Err(EvaluationError::InvalidRating {
                instructor: instructor.name,
                value,
            });
        }

        Ok(Self {
            course_id,
            days: days.to_vec(),
            start,
            end,
            building: building.into(),
            instructor,
        })
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn building(&self) -> &str {
        &self.building
    }

    pub fn instructor(&self) -> &Instructor {
        &self.instructor
    }

    pub fn meets_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    pub fn shared_days(&self, other: &ClassSection) -> Vec<Weekday> {
        self.days
            .iter()
            .unique()
            .filter(|d| other.meets_on(**d))
            .copied()
            .sorted()
            .collect()
    }

    /// Half-open overlap on at least one common day. Back-to-back is fine.
    pub fn overlaps(&self, other: &ClassSection) -> bool {
        self.start < other.end
            && other.start < self.end
            && self.days.iter().any(|d| other.meets_on(*d))
    }
}

/// A student's set of class sections for one term.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Schedule {
    pub sections: Vec<ClassSection>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, section: ClassSection) -> Self {
        self.sections.push(section);
        self
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections grouped per weekday, each day in start-time order.
    ///
    /// Two classes are consecutive when they are neighbours in one day's
    /// list. A section that meets on several days shows up in each of them.
    pub fn sections_by_day(&self) -> BTreeMap<Weekday, Vec<&ClassSection>> {
        self.sections
            .iter()
            .flat_map(|s| s.days.iter().unique().map(move |d| (*d, s)))
            .into_group_map()
            .into_iter()
            .map(|(day, mut sections)| {
                sections.sort_by_key(|s| (s.start, s.end));
                (day, sections)
            })
            .collect()
    }
}

/// Travel distances between campus buildings.
///
/// Stored as `from -> to -> distance`, which is also its JSON shape. A pair
/// only needs to be stored in one direction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DistanceTable {
    distances: HashMap<BuildingId, HashMap<BuildingId, f64>>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        from: impl Into<BuildingId>,
        to: impl Into<BuildingId>,
        distance: f64,
    ) {
        self.distances
            .entry(from.into())
            .or_default()
            .insert(to.into(), distance);
    }

    pub fn with_distance(mut self, from: &str, to: &str, distance: f64) -> Self {
        self.insert(from, to, distance);
        self
    }

    /// Fails if the pair is missing in both directions, or if the stored
    /// distance is negative or not a number.
    pub fn distance_between(&self, from: &str, to: &str) -> Result<f64, EvaluationError> {
        if from == to {
            return Ok(0.0);
        }
        let distance = self
            .lookup(from, to)
            .or_else(|| self.lookup(to, from))
            .ok_or_else(|| EvaluationError::MissingDistance {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        if !distance.is_finite() || distance < 0.0 {
            return Err(EvaluationError::InvalidDistance {
                from: from.to_string(),
                to: to.to_string(),
                value: distance,
            });
        }
        Ok(distance)
    }

    fn lookup(&self, from: &str, to: &str) -> Option<f64> {
        self.distances.get(from).and_then(|row| row.get(to)).copied()
    }
}

/// Weights for instructor quality, max distance and average idle time,
/// in that order. Only constructible when they form a convex combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights([f64; OBJECTIVE_COUNT]);

impl Weights {
    pub fn new(weights: &[f64]) -> Result<Self, EvaluationError> {
        let weights: [f64; OBJECTIVE_COUNT] = weights
            .try_into()
            .map_err(|_| EvaluationError::WrongWeightCount(weights.len()))?;

        if let Some((index, &value)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(EvaluationError::NegativeWeight { index, value });
        }

        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EvaluationError::WeightSumNotOne(sum));
        }

        Ok(Weights(weights))
    }

    pub fn quality(&self) -> f64 {
        self.0[0]
    }

    pub fn distance(&self) -> f64 {
        self.0[1]
    }

    pub fn idle_time(&self) -> f64 {
        self.0[2]
    }
}

impl TryFrom<Vec<f64>> for Weights {
    type Error = EvaluationError;

    fn try_from(weights: Vec<f64>) -> Result<Self, Self::Error> {
        Weights::new(&weights)
    }
}
