use crate::prelude::DetectorConfig;
use crate::step_interface::{AnnotatedSample, StepClass, StepEvent};

/// Maps peak magnitudes onto step classes with strict `>` thresholds.
pub struct Classifier {
    walking_threshold: f64,
    jogging_threshold: f64,
    running_threshold: f64,
}

impl Classifier {
    pub fn new(walking_threshold: f64, jogging_threshold: f64, running_threshold: f64) -> Self {
        Self {
            walking_threshold,
            jogging_threshold,
            running_threshold,
        }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(
            config.walking_threshold,
            config.jogging_threshold,
            config.running_threshold,
        )
    }

    pub fn classify(&self, magnitude: f64) -> StepClass {
        if magnitude > self.running_threshold {
            StepClass::Running
        } else if magnitude > self.jogging_threshold {
            StepClass::Jogging
        } else if magnitude > self.walking_threshold {
            StepClass::Walking
        } else {
            StepClass::Stationary
        }
    }

    pub fn emit(&self, peaks: &[AnnotatedSample]) -> Vec<StepEvent> {
        peaks
            .iter()
            .map(|peak| StepEvent::new(*peak, self.classify(peak.magnitude())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::test_series;

    fn classifier() -> Classifier {
        Classifier::new(5.0, 12.0, 23.0)
    }

    #[test]
    fn classes_follow_threshold_bands() {
        let classifier = classifier();
        assert_eq!(classifier.classify(0.0), StepClass::Stationary);
        assert_eq!(classifier.classify(6.0), StepClass::Walking);
        assert_eq!(classifier.classify(14.0), StepClass::Jogging);
        assert_eq!(classifier.classify(30.0), StepClass::Running);
    }

    #[test]
    fn boundaries_use_strict_comparison() {
        let classifier = classifier();
        assert_eq!(classifier.classify(5.0), StepClass::Stationary);
        assert_eq!(classifier.classify(12.0), StepClass::Walking);
        assert_eq!(classifier.classify(23.0), StepClass::Jogging);
        assert_eq!(classifier.classify(23.000001), StepClass::Running);
    }

    #[test]
    fn from_config_uses_configured_thresholds() {
        let config = DetectorConfig {
            walking_threshold: 13.0,
            jogging_threshold: 22.0,
            running_threshold: 29.0,
            ..Default::default()
        };
        let classifier = Classifier::from_config(&config);
        assert_eq!(classifier.classify(14.0), StepClass::Walking);
        assert_eq!(classifier.classify(25.0), StepClass::Jogging);
    }

    #[test]
    fn emit_preserves_peak_order() {
        let peaks = test_series(&[(30.0, 0), (6.0, 600), (14.0, 1_200)]);
        let classes: Vec<StepClass> = classifier().emit(&peaks).iter().map(|e| e.class).collect();
        assert_eq!(
            classes,
            vec![StepClass::Running, StepClass::Walking, StepClass::Jogging]
        );
    }
}
