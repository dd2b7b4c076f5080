use crate::clock::TimeBase;
use crate::math::stats::StatsHelper;
use crate::step_interface::{AnnotatedSample, Sample};

const NANOS_PER_MILLI: i64 = 1_000_000;

/// Attaches the scalar magnitude and a wall-clock timestamp to each sample.
pub struct MagnitudeStage {
    time_base: Box<dyn TimeBase>,
}

impl MagnitudeStage {
    pub fn new(time_base: Box<dyn TimeBase>) -> Self {
        Self { time_base }
    }

    /// Annotates a sample whose own axes carry the motion to measure.
    pub fn annotate(&self, sample: Sample) -> AnnotatedSample {
        self.annotate_motion(sample, sample.axes())
    }

    /// Annotates `raw` with the magnitude of `motion`, typically the reading
    /// with gravity removed. The stored sample stays the raw reading.
    pub fn annotate_motion(&self, raw: Sample, motion: [f64; 3]) -> AnnotatedSample {
        let magnitude = StatsHelper::norm(motion);
        // Read per sample; the wall and monotonic clocks drift apart over a session.
        let offset = self.time_base.offset_ms();
        let time_ms = (raw.timestamp_ns / NANOS_PER_MILLI).saturating_add(offset);
        AnnotatedSample::new(raw, magnitude, time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedTimeBase;
    use std::cell::Cell;

    #[test]
    fn annotate_computes_norm_and_wall_time() {
        let stage = MagnitudeStage::new(Box::new(FixedTimeBase::new(10_000, 4_000)));
        let annotated = stage.annotate(Sample::new(3.0, 0.0, 4.0, 2_500_000));
        assert_eq!(annotated.magnitude(), 5.0);
        // 2ms + (10000 - 4000)
        assert_eq!(annotated.time_ms(), 6_002);
        assert_eq!(annotated.sample().timestamp_ns, 2_500_000);
    }

    struct DriftingTimeBase {
        wall: Cell<i64>,
    }

    impl TimeBase for DriftingTimeBase {
        fn wall_clock_ms(&self) -> i64 {
            let now = self.wall.get();
            self.wall.set(now + 7);
            now
        }

        fn monotonic_ms(&self) -> i64 {
            0
        }
    }

    #[test]
    fn annotate_motion_keeps_raw_reading() {
        let stage = MagnitudeStage::new(Box::new(FixedTimeBase::identity()));
        let raw = Sample::new(0.0, 0.0, 40.0, 3_000_000);
        let annotated = stage.annotate_motion(raw, [0.0, 6.0, 8.0]);
        assert_eq!(annotated.magnitude(), 10.0);
        assert_eq!(*annotated.sample(), raw);
        assert_eq!(annotated.time_ms(), 3);
    }

    #[test]
    fn extreme_offset_saturates() {
        let stage = MagnitudeStage::new(Box::new(FixedTimeBase::new(i64::MAX, 0)));
        let annotated = stage.annotate(Sample::new(1.0, 0.0, 0.0, 5_000_000_000));
        assert_eq!(annotated.time_ms(), i64::MAX);
    }

    #[test]
    fn offset_is_read_for_every_sample() {
        let stage = MagnitudeStage::new(Box::new(DriftingTimeBase {
            wall: Cell::new(1_000),
        }));
        let first = stage.annotate(Sample::new(0.0, 0.0, 1.0, 0));
        let second = stage.annotate(Sample::new(0.0, 0.0, 1.0, 0));
        assert_eq!(first.time_ms(), 1_000);
        assert_eq!(second.time_ms(), 1_007);
    }
}
