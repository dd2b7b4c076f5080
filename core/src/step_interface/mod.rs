pub mod event;
pub mod sample;

pub use event::{StepClass, StepEvent};
pub use sample::{AnnotatedSample, Sample};
