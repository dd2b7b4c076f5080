use crate::prelude::{ProcessingStage, StageInput, StageMetadata, StageOutput};
use crate::step_interface::AnnotatedSample;

/// Collapses peaks that sit closer together than one step can take.
pub struct PeakDeduplicator {
    min_step_interval_ms: i64,
}

impl PeakDeduplicator {
    pub fn new(min_step_interval_ms: i64) -> Self {
        Self {
            min_step_interval_ms,
        }
    }

    /// Marks the weaker peak of every adjacent pair inside the interval (the
    /// later one on a tie), then keeps the unmarked peaks in order. Every pair
    /// is judged against the input sequence, never against partial results.
    pub fn dedupe(&self, peaks: &[AnnotatedSample]) -> Vec<AnnotatedSample> {
        let suppressed = self.suppressed(peaks);
        peaks
            .iter()
            .zip(suppressed)
            .filter_map(|(peak, dropped)| (!dropped).then_some(*peak))
            .collect()
    }

    fn suppressed(&self, peaks: &[AnnotatedSample]) -> Vec<bool> {
        let mut marks = vec![false; peaks.len()];
        for (index, pair) in peaks.windows(2).enumerate() {
            let (earlier, later) = (&pair[0], &pair[1]);
            if later.time_ms() - earlier.time_ms() < self.min_step_interval_ms {
                if later.magnitude() > earlier.magnitude() {
                    marks[index] = true;
                } else {
                    marks[index + 1] = true;
                }
            }
        }
        marks
    }
}

impl ProcessingStage for PeakDeduplicator {
    fn name(&self) -> &'static str {
        "PeakDeduplicator"
    }

    fn execute(&self, input: StageInput<'_>) -> StageOutput {
        let survivors = self.dedupe(input.samples);
        let dropped = input.samples.len() - survivors.len();
        let metadata = StageMetadata {
            dropped,
            notes: vec![format!(
                "suppressed {} of {} peaks within {}ms",
                dropped,
                input.samples.len(),
                self.min_step_interval_ms
            )],
        };
        StageOutput {
            samples: survivors,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::test_series;

    fn magnitudes(peaks: &[AnnotatedSample]) -> Vec<f64> {
        peaks.iter().map(|p| p.magnitude()).collect()
    }

    #[test]
    fn weaker_close_peak_is_removed() {
        let peaks = test_series(&[(20.0, 1_000), (15.0, 1_100)]);
        let kept = PeakDeduplicator::new(500).dedupe(&peaks);
        assert_eq!(magnitudes(&kept), vec![20.0]);

        let reversed = test_series(&[(15.0, 1_000), (20.0, 1_100)]);
        let kept = PeakDeduplicator::new(500).dedupe(&reversed);
        assert_eq!(magnitudes(&kept), vec![20.0]);
    }

    #[test]
    fn peaks_at_or_beyond_interval_are_kept() {
        let peaks = test_series(&[(20.0, 0), (15.0, 500), (18.0, 1_200)]);
        let kept = PeakDeduplicator::new(500).dedupe(&peaks);
        assert_eq!(magnitudes(&kept), vec![20.0, 15.0, 18.0]);
    }

    #[test]
    fn exact_tie_drops_the_later_peak() {
        let peaks = test_series(&[(10.0, 0), (10.0, 50)]);
        let kept = PeakDeduplicator::new(500).dedupe(&peaks);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].time_ms(), 0);
    }

    #[test]
    fn cluster_is_judged_on_input_adjacent_pairs() {
        // (10, 8) drops 8; (8, 12) drops 8 again; 10 and 12 are never compared.
        let peaks = test_series(&[(10.0, 0), (8.0, 100), (12.0, 200)]);
        let kept = PeakDeduplicator::new(500).dedupe(&peaks);
        assert_eq!(magnitudes(&kept), vec![10.0, 12.0]);
    }

    #[test]
    fn rising_cluster_keeps_only_the_strongest() {
        let peaks = test_series(&[(6.0, 0), (9.0, 100), (14.0, 200)]);
        let kept = PeakDeduplicator::new(500).dedupe(&peaks);
        assert_eq!(magnitudes(&kept), vec![14.0]);
    }

    #[test]
    fn empty_and_single_inputs_pass_through() {
        let dedup = PeakDeduplicator::new(400);
        assert!(dedup.dedupe(&[]).is_empty());
        let single = test_series(&[(7.0, 0)]);
        assert_eq!(dedup.dedupe(&single).len(), 1);
    }

    #[test]
    fn stage_output_counts_suppressed_peaks() {
        let peaks = test_series(&[(20.0, 0), (15.0, 100)]);
        let output = PeakDeduplicator::new(500).execute(StageInput::new(&peaks));
        assert_eq!(output.metadata.dropped, 1);
        assert_eq!(output.metadata.notes[0], "suppressed 1 of 2 peaks within 500ms");
    }
}
