use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Counters accumulated over a detector's lifetime.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub samples_accepted: usize,
    pub samples_rejected: usize,
    pub batches_processed: usize,
    pub peaks_found: usize,
    pub peaks_suppressed: usize,
    pub steps_emitted: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_accepted(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.samples_accepted += 1;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.samples_rejected += 1;
        }
    }

    pub fn record_batch(&self, peaks_found: usize, peaks_suppressed: usize, steps_emitted: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.batches_processed += 1;
            metrics.peaks_found += peaks_found;
            metrics.peaks_suppressed += peaks_suppressed;
            metrics.steps_emitted += steps_emitted;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_accumulate_counts() {
        let recorder = MetricsRecorder::new();
        recorder.record_accepted();
        recorder.record_accepted();
        recorder.record_rejected();
        recorder.record_batch(3, 1, 2);
        recorder.record_batch(0, 0, 0);

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.samples_accepted, 2);
        assert_eq!(snapshot.samples_rejected, 1);
        assert_eq!(snapshot.batches_processed, 2);
        assert_eq!(snapshot.peaks_found, 3);
        assert_eq!(snapshot.peaks_suppressed, 1);
        assert_eq!(snapshot.steps_emitted, 2);
    }
}
