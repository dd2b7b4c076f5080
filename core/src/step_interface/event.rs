use crate::step_interface::AnnotatedSample;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Step intensity, ordered by increasing threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepClass {
    Stationary,
    Walking,
    Jogging,
    Running,
}

impl StepClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepClass::Stationary => "stationary",
            StepClass::Walking => "walking",
            StepClass::Jogging => "jogging",
            StepClass::Running => "running",
        }
    }
}

impl fmt::Display for StepClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected step handed to the listener.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepEvent {
    pub peak: AnnotatedSample,
    pub class: StepClass,
}

impl StepEvent {
    pub fn new(peak: AnnotatedSample, class: StepClass) -> Self {
        Self { peak, class }
    }
}
