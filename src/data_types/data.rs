use chrono::{DateTime, TimeDelta, Utc};

/// Raw samples behind a chart, used for tooltip content.
/// Sample `i` was taken at `start + i * sample_interval`.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub start: DateTime<Utc>,
    pub sample_interval: TimeDelta,
    pub values: Vec<f64>,
}

impl Dataset {
    pub fn new(start: DateTime<Utc>, sample_interval: TimeDelta, values: Vec<f64>) -> Self {
        Self {
            start,
            sample_interval,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `None` past the end of the dataset or on timestamp overflow.
    pub fn timestamp(&self, index: usize) -> Option<DateTime<Utc>> {
        if index >= self.values.len() {
            return None;
        }
        let steps = i32::try_from(index).ok()?;
        let offset = self.sample_interval.checked_mul(steps)?;
        self.start.checked_add_signed(offset)
    }

    pub fn sample(&self, index: usize) -> Option<(DateTime<Utc>, f64)> {
        Some((self.timestamp(index)?, *self.values.get(index)?))
    }
}

/// Normalizes raw values into `out` (cleared first), reusing its allocation.
pub fn normalize_series_into(values: &[f32], out: &mut Vec<f32>) {
    out.clear();
    out.extend(values.iter().copied().map(crate::transform::clamp01));
}
