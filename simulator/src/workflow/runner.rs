use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::warn;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use stepcore::telemetry::MetricsSnapshot;
use stepcore::{
    AnnotatedSample, EventLog, FixedTimeBase, Sample, StepClass, StepDetector, StepEvent,
    StepListener, StepTally,
};

/// Keeps both the running tally and the full event list for a session.
#[derive(Default)]
struct SessionListener {
    tally: StepTally,
    log: EventLog,
}

impl StepListener for SessionListener {
    fn on_step(&mut self, peak: &AnnotatedSample, class: StepClass) {
        self.tally.on_step(peak, class);
        self.log.on_step(peak, class);
    }
}

#[derive(Debug, Serialize)]
pub struct WorkflowResult {
    pub samples: usize,
    pub rejected: usize,
    pub flushed_steps: usize,
    pub tally: StepTally,
    pub metrics: MetricsSnapshot,
    pub events: Vec<StepEvent>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, samples: &[Sample]) -> anyhow::Result<WorkflowResult> {
        // Sample timestamps start at zero; map them onto the configured epoch.
        let time_base = FixedTimeBase::new(self.config.epoch_ms, 0);
        let mut detector =
            StepDetector::with_time_base(self.config.detector.clone(), Box::new(time_base))
                .context("building step detector")?;
        let session = Rc::new(RefCell::new(SessionListener::default()));
        detector.register_listener(Rc::clone(&session));

        let mut rejected = 0;
        for (index, sample) in samples.iter().enumerate() {
            if let Err(err) = detector.add(*sample) {
                warn!("skipping sample {}: {}", index, err);
                rejected += 1;
            }
        }

        let flushed_steps = if self.config.flush {
            detector.flush()
        } else {
            0
        };

        let metrics = detector.metrics().snapshot();
        drop(detector);
        let session = Rc::try_unwrap(session)
            .map_err(|_| anyhow::anyhow!("session listener still shared"))?
            .into_inner();

        Ok(WorkflowResult {
            samples: samples.len(),
            rejected,
            flushed_steps,
            tally: session.tally,
            metrics,
            events: session.log.into_events(),
        })
    }
}
