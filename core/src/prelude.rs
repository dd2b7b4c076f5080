use crate::step_interface::AnnotatedSample;
use serde::{Deserialize, Serialize};

/// Detector configuration, fixed for the lifetime of a detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Samples accumulated before a batch is scanned.
    pub batch_size: usize,
    pub walking_threshold: f64,
    pub jogging_threshold: f64,
    pub running_threshold: f64,
    /// Peaks closer than this (in wall-clock ms) are treated as one step.
    pub min_step_interval_ms: i64,
    pub gravity_filter_enabled: bool,
    /// Weight of the previous gravity estimate in the low-pass filter.
    pub gravity_smoothing_alpha: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            walking_threshold: 5.0,
            jogging_threshold: 12.0,
            running_threshold: 23.0,
            min_step_interval_ms: 500,
            gravity_filter_enabled: true,
            gravity_smoothing_alpha: 0.8,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> StepResult<()> {
        if self.batch_size < 2 {
            return Err(StepError::InvalidConfig(format!(
                "batch_size must be at least 2, got {}",
                self.batch_size
            )));
        }

        let thresholds = [
            self.walking_threshold,
            self.jogging_threshold,
            self.running_threshold,
        ];
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(StepError::InvalidConfig(format!(
                "thresholds must be finite, got {:?}",
                thresholds
            )));
        }
        if !(self.walking_threshold < self.jogging_threshold
            && self.jogging_threshold < self.running_threshold)
        {
            return Err(StepError::InvalidConfig(format!(
                "thresholds must be strictly increasing (walking < jogging < running), got {:?}",
                thresholds
            )));
        }

        if self.min_step_interval_ms <= 0 {
            return Err(StepError::InvalidConfig(format!(
                "min_step_interval_ms must be positive, got {}",
                self.min_step_interval_ms
            )));
        }

        let alpha = self.gravity_smoothing_alpha;
        if !(alpha.is_finite() && (0.0..1.0).contains(&alpha)) {
            return Err(StepError::InvalidConfig(format!(
                "gravity_smoothing_alpha must lie in [0, 1), got {}",
                alpha
            )));
        }

        Ok(())
    }
}

/// Input for a batch stage: the samples it scans, in chronological order.
#[derive(Debug, Clone, Copy)]
pub struct StageInput<'a> {
    pub samples: &'a [AnnotatedSample],
    /// No more samples follow this batch.
    pub end_of_stream: bool,
}

impl<'a> StageInput<'a> {
    pub fn new(samples: &'a [AnnotatedSample]) -> Self {
        Self {
            samples,
            end_of_stream: false,
        }
    }

    pub fn end_of_stream(samples: &'a [AnnotatedSample]) -> Self {
        Self {
            samples,
            end_of_stream: true,
        }
    }
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub samples: Vec<AnnotatedSample>,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and telemetry.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    /// Samples from the input that did not make it into the output.
    pub dropped: usize,
    pub notes: Vec<String>,
}

/// Common error type for the detector.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StepError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type StepResult<T> = Result<T, StepError>;

/// A pure batch-to-batch stage of the step pipeline.
pub trait ProcessingStage {
    fn name(&self) -> &'static str;
    fn execute(&self, input: StageInput<'_>) -> StageOutput;
}
