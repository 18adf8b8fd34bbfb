//! Min-max normalization against fixed per-metric bounds.

/// The range a raw metric is expected to fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

/// Rating scale: 1.0 is the lowest possible rating, 5.0 the highest.
pub const QUALITY_RANGE: MetricRange = MetricRange { min: 1.0, max: 5.0 };

/// Same building is 0. The longest walk in the campus data is 22.1,
/// so 30 leaves headroom.
pub const DISTANCE_RANGE: MetricRange = MetricRange { min: 0.0, max: 30.0 };

/// Minutes. Classes run from 8:00 to 21:00, a 780 minute span.
pub const IDLE_TIME_RANGE: MetricRange = MetricRange { min: 0.0, max: 780.0 };

/// Maps `value` into [0, 1]. Values outside the range are clipped to the
/// nearest bound rather than stretching the scale. NaN maps to 0.
pub fn normalize(value: f64, range: MetricRange) -> f64 {
    if value.is_nan() || value < range.min {
        0.0
    } else if value > range.max {
        1.0
    } else {
        (value - range.min) / (range.max - range.min)
    }
}
