use crate::prelude::{ProcessingStage, StageInput, StageMetadata, StageOutput};
use crate::step_interface::AnnotatedSample;

/// What to do with an above-threshold run still open when the batch ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrailingRun {
    /// Drop it; the batch boundary is not treated as the end of the run.
    Discard,
    /// Treat the end of the batch as the end of the run.
    Close,
}

/// Picks one peak per contiguous run of samples above the walking threshold.
pub struct PeakFinder {
    walking_threshold: f64,
}

impl PeakFinder {
    pub fn new(walking_threshold: f64) -> Self {
        Self { walking_threshold }
    }

    /// Peaks of every run closed inside the batch. A run still open at the
    /// last sample yields nothing.
    pub fn find(&self, batch: &[AnnotatedSample]) -> Vec<AnnotatedSample> {
        self.scan(batch, TrailingRun::Discard)
    }

    /// Like [`PeakFinder::find`], but the end of the batch closes an open run.
    pub fn find_through_end(&self, batch: &[AnnotatedSample]) -> Vec<AnnotatedSample> {
        self.scan(batch, TrailingRun::Close)
    }

    fn scan(&self, batch: &[AnnotatedSample], trailing: TrailingRun) -> Vec<AnnotatedSample> {
        let mut peaks = Vec::new();
        let mut run_peak: Option<AnnotatedSample> = None;

        for sample in batch {
            if sample.magnitude() > self.walking_threshold {
                // `>=` keeps the last of equal maxima.
                match run_peak {
                    Some(peak) if sample.magnitude() < peak.magnitude() => {}
                    _ => run_peak = Some(*sample),
                }
            } else if let Some(peak) = run_peak.take() {
                peaks.push(peak);
            }
        }

        if trailing == TrailingRun::Close {
            peaks.extend(run_peak);
        }
        peaks
    }
}

impl ProcessingStage for PeakFinder {
    fn name(&self) -> &'static str {
        "PeakFinder"
    }

    fn execute(&self, input: StageInput<'_>) -> StageOutput {
        let peaks = if input.end_of_stream {
            self.find_through_end(input.samples)
        } else {
            self.find(input.samples)
        };
        let mut notes = vec![format!(
            "{} peaks above {:.2} in {} samples",
            peaks.len(),
            self.walking_threshold,
            input.samples.len()
        )];
        if input.end_of_stream {
            notes.push("end of stream closes the trailing run".to_string());
        }
        let metadata = StageMetadata {
            dropped: input.samples.len() - peaks.len(),
            notes,
        };
        StageOutput {
            samples: peaks,
            metadata,
        }
    }
}
