//! Accelerometer step detection.
//!
//! Raw 3-axis samples are gravity-filtered, reduced to a magnitude, and
//! buffered into fixed-size batches. Each full batch is scanned for one peak
//! per above-threshold run, close peaks are collapsed, and the survivors are
//! classified as walking, jogging or running steps and handed to a listener.
//!
//! ```
//! use stepcore::{DetectorConfig, StepDetector, StepTally};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut detector = StepDetector::new(DetectorConfig::default()).unwrap();
//! let tally = Rc::new(RefCell::new(StepTally::new()));
//! detector.register_listener(Rc::clone(&tally));
//! detector.add_sample(0.1, 0.2, 9.8, 1_000_000).unwrap();
//! assert_eq!(tally.borrow().total(), 0);
//! ```

pub mod clock;
pub mod detector;
pub mod listener;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod step_interface;
pub mod telemetry;

pub use clock::{FixedTimeBase, SystemTimeBase, TimeBase};
pub use detector::StepDetector;
pub use listener::{EventLog, StepListener, StepTally};
pub use prelude::{DetectorConfig, StepError, StepResult};
pub use step_interface::{AnnotatedSample, Sample, StepClass, StepEvent};
