//! Step detector: validates and annotates samples one at a time, and runs the
//! peak pipeline whenever a full batch has accumulated.

use crate::clock::{SystemTimeBase, TimeBase};
use crate::listener::StepListener;
use crate::math::stats::StatsHelper;
use crate::prelude::{DetectorConfig, ProcessingStage, StageInput, StepResult};
use crate::processing::{
    BatchBuffer, Classifier, GravityFilter, MagnitudeStage, PeakDeduplicator, PeakFinder,
};
use crate::step_interface::{AnnotatedSample, Sample};
use crate::telemetry::{LogManager, MetricsRecorder};

pub struct StepDetector {
    config: DetectorConfig,
    gravity: Option<GravityFilter>,
    magnitude: MagnitudeStage,
    buffer: BatchBuffer,
    finder: PeakFinder,
    deduplicator: PeakDeduplicator,
    classifier: Classifier,
    listener: Option<Box<dyn StepListener>>,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl StepDetector {
    /// Detector on the host clocks. Fails on an invalid configuration.
    pub fn new(config: DetectorConfig) -> StepResult<Self> {
        Self::with_time_base(config, Box::new(SystemTimeBase::new()))
    }

    pub fn with_time_base(config: DetectorConfig, time_base: Box<dyn TimeBase>) -> StepResult<Self> {
        config.validate()?;

        let gravity = config
            .gravity_filter_enabled
            .then(|| GravityFilter::new(config.gravity_smoothing_alpha));

        Ok(Self {
            gravity,
            magnitude: MagnitudeStage::new(time_base),
            buffer: BatchBuffer::with_batch_size(config.batch_size),
            finder: PeakFinder::new(config.walking_threshold),
            deduplicator: PeakDeduplicator::new(config.min_step_interval_ms),
            classifier: Classifier::from_config(&config),
            listener: None,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new(),
            config,
        })
    }

    /// Replaces any previously registered listener.
    pub fn register_listener<L: StepListener + 'static>(&mut self, listener: L) {
        self.listener = Some(Box::new(listener));
    }

    pub fn add_sample(&mut self, x: f64, y: f64, z: f64, timestamp_ns: i64) -> StepResult<usize> {
        self.add(Sample::new(x, y, z, timestamp_ns))
    }

    /// Feeds one reading. Returns the number of steps emitted by this call,
    /// which is zero unless the reading completed a batch.
    pub fn add(&mut self, sample: Sample) -> StepResult<usize> {
        if let Err(err) = sample.validate() {
            self.metrics.record_rejected();
            self.logger.reject(&format!("rejected sample: {}", err));
            return Err(err);
        }
        self.metrics.record_accepted();

        // Magnitude comes from the motion component; the peak keeps the raw reading.
        let motion = match self.gravity.as_mut() {
            Some(filter) => filter.apply(sample).axes(),
            None => sample.axes(),
        };
        let annotated = self.magnitude.annotate_motion(sample, motion);

        if !self.buffer.push(annotated) {
            return Ok(0);
        }
        let batch = self.buffer.take_batch();
        let emitted = self.process(&batch, false);
        self.buffer.recycle(batch);
        Ok(emitted)
    }

    /// Processes whatever is buffered, even short of a full batch, treating the
    /// end of the buffer as the end of any open run. Returns the steps emitted.
    pub fn flush(&mut self) -> usize {
        if self.buffer.is_empty() {
            return 0;
        }
        let batch = self.buffer.take_batch();
        let emitted = self.process(&batch, true);
        self.buffer.recycle(batch);
        emitted
    }

    fn process(&mut self, batch: &[AnnotatedSample], end_of_stream: bool) -> usize {
        let magnitudes: Vec<f64> = batch.iter().map(|s| s.magnitude()).collect();
        self.logger.record(&format!(
            "batch of {} samples, RMS magnitude {:.4}",
            batch.len(),
            StatsHelper::rms(&magnitudes)
        ));

        let input = if end_of_stream {
            StageInput::end_of_stream(batch)
        } else {
            StageInput::new(batch)
        };
        let found = self.finder.execute(input);
        self.log_notes(self.finder.name(), &found.metadata.notes);
        let peaks = found.samples;

        let deduped = self.deduplicator.execute(StageInput::new(&peaks));
        self.log_notes(self.deduplicator.name(), &deduped.metadata.notes);

        let events = self.classifier.emit(&deduped.samples);
        match self.listener.as_mut() {
            Some(listener) => {
                for event in &events {
                    listener.on_step(&event.peak, event.class);
                }
            }
            None if !events.is_empty() => {
                self.logger.record(&format!(
                    "no listener registered; dropping {} steps",
                    events.len()
                ));
            }
            None => {}
        }

        self.metrics
            .record_batch(peaks.len(), deduped.metadata.dropped, events.len());
        events.len()
    }

    fn log_notes(&self, stage: &str, notes: &[String]) {
        for note in notes {
            self.logger.record(&format!("{}: {}", stage, note));
        }
    }

    /// Samples waiting for the current batch to fill.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Current gravity estimate, if the filter is enabled.
    pub fn gravity(&self) -> Option<[f64; 3]> {
        self.gravity.as_ref().map(GravityFilter::gravity)
    }
}
