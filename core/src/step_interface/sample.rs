use crate::prelude::{StepError, StepResult};
use serde::{Deserialize, Serialize};

/// Raw accelerometer reading as delivered by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Monotonic nanoseconds since device boot.
    pub timestamp_ns: i64,
}

impl Sample {
    pub fn new(x: f64, y: f64, z: f64, timestamp_ns: i64) -> Self {
        Self {
            x,
            y,
            z,
            timestamp_ns,
        }
    }

    pub fn axes(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Rejects readings that would poison the gravity estimate or the time base.
    pub fn validate(&self) -> StepResult<()> {
        if !(self.x.is_finite() && self.y.is_finite() && self.z.is_finite()) {
            return Err(StepError::InvalidInput(format!(
                "non-finite axis value ({}, {}, {})",
                self.x, self.y, self.z
            )));
        }
        if self.timestamp_ns < 0 {
            return Err(StepError::InvalidInput(format!(
                "negative timestamp {}ns",
                self.timestamp_ns
            )));
        }
        Ok(())
    }
}

/// A raw sample annotated by the magnitude stage with its scalar magnitude and
/// wall-clock millisecond timestamp. The reading itself is kept unfiltered; the
/// magnitude may come from gravity-filtered axes.
///
/// Callers cannot fill in the derived fields themselves:
///
/// ```compile_fail
/// let forged = stepcore::AnnotatedSample {
///     sample: stepcore::Sample::new(0.0, 0.0, 0.0, 0),
///     magnitude: 99.0,
///     time_ms: 0,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnotatedSample {
    sample: Sample,
    magnitude: f64,
    time_ms: i64,
}

impl AnnotatedSample {
    pub(crate) fn new(sample: Sample, magnitude: f64, time_ms: i64) -> Self {
        Self {
            sample,
            magnitude,
            time_ms,
        }
    }

    /// The reading as the caller supplied it.
    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn time_ms(&self) -> i64 {
        self.time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_finite_reading() {
        assert!(Sample::new(0.1, -9.8, 0.3, 0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_nan_and_infinite_axes() {
        for sample in [
            Sample::new(f64::NAN, 0.0, 0.0, 10),
            Sample::new(0.0, f64::INFINITY, 0.0, 10),
            Sample::new(0.0, 0.0, f64::NEG_INFINITY, 10),
        ] {
            assert!(matches!(
                sample.validate(),
                Err(StepError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn validate_rejects_negative_timestamp() {
        let err = Sample::new(0.0, 0.0, 9.8, -1).validate().unwrap_err();
        assert!(err.to_string().contains("negative timestamp"));
    }

    #[test]
    fn annotated_sample_serializes_reading_and_derived_fields() {
        let annotated = AnnotatedSample::new(Sample::new(0.0, 0.0, 40.0, 2_000_000), 24.16, 2);
        let json = serde_json::to_value(annotated).unwrap();
        assert_eq!(json["sample"]["z"], 40.0);
        assert_eq!(json["magnitude"], 24.16);
        assert_eq!(json["time_ms"], 2);
    }
}
