use crate::step_interface::{AnnotatedSample, StepClass, StepEvent};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Receives classified steps. Called synchronously from
/// [`StepDetector::add_sample`](crate::detector::StepDetector::add_sample),
/// once per step and in chronological order.
#[cfg_attr(test, mockall::automock)]
pub trait StepListener {
    fn on_step(&mut self, peak: &AnnotatedSample, class: StepClass);
}

/// Lets the caller keep a handle on a listener the detector owns.
impl<L: StepListener> StepListener for Rc<RefCell<L>> {
    fn on_step(&mut self, peak: &AnnotatedSample, class: StepClass) {
        self.borrow_mut().on_step(peak, class);
    }
}

/// Per-class step counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTally {
    pub walking: usize,
    pub jogging: usize,
    pub running: usize,
    pub stationary: usize,
    pub latest: Option<StepClass>,
}

impl StepTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps that involved movement; stationary events are not steps.
    pub fn total(&self) -> usize {
        self.walking + self.jogging + self.running
    }

    pub fn count(&self, class: StepClass) -> usize {
        match class {
            StepClass::Stationary => self.stationary,
            StepClass::Walking => self.walking,
            StepClass::Jogging => self.jogging,
            StepClass::Running => self.running,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl StepListener for StepTally {
    fn on_step(&mut self, _peak: &AnnotatedSample, class: StepClass) {
        match class {
            StepClass::Stationary => self.stationary += 1,
            StepClass::Walking => self.walking += 1,
            StepClass::Jogging => self.jogging += 1,
            StepClass::Running => self.running += 1,
        }
        self.latest = Some(class);
    }
}

/// Records every event in arrival order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<StepEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    pub fn classes(&self) -> Vec<StepClass> {
        self.events.iter().map(|event| event.class).collect()
    }

    pub fn into_events(self) -> Vec<StepEvent> {
        self.events
    }
}

impl StepListener for EventLog {
    fn on_step(&mut self, peak: &AnnotatedSample, class: StepClass) {
        self.events.push(StepEvent::new(*peak, class));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::test_series;

    #[test]
    fn tally_counts_each_class_and_tracks_latest() {
        let peak = test_series(&[(10.0, 0)])[0];
        let mut tally = StepTally::new();
        tally.on_step(&peak, StepClass::Walking);
        tally.on_step(&peak, StepClass::Running);
        tally.on_step(&peak, StepClass::Running);
        tally.on_step(&peak, StepClass::Stationary);

        assert_eq!(tally.count(StepClass::Running), 2);
        assert_eq!(tally.count(StepClass::Walking), 1);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.latest, Some(StepClass::Stationary));

        tally.reset();
        assert_eq!(tally, StepTally::default());
    }

    #[test]
    fn shared_listener_observes_through_handle() {
        let peaks = test_series(&[(14.0, 0), (30.0, 600)]);
        let log = Rc::new(RefCell::new(EventLog::new()));
        let mut handle = Rc::clone(&log);
        handle.on_step(&peaks[0], StepClass::Jogging);
        handle.on_step(&peaks[1], StepClass::Running);

        let log = log.borrow();
        assert_eq!(log.classes(), vec![StepClass::Jogging, StepClass::Running]);
        assert_eq!(log.events()[1].peak.time_ms(), 600);
    }
}
