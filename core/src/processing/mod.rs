pub mod batch_buffer;
pub mod classify;
pub mod dedup;
pub mod gravity;
pub mod magnitude;
pub mod peaks;

pub use batch_buffer::BatchBuffer;
pub use classify::Classifier;
pub use dedup::PeakDeduplicator;
pub use gravity::GravityFilter;
pub use magnitude::MagnitudeStage;
pub use peaks::PeakFinder;

/// Annotated samples from `(magnitude, time_ms)` pairs.
#[cfg(test)]
pub(crate) fn test_series(
    points: &[(f64, i64)],
) -> Vec<crate::step_interface::AnnotatedSample> {
    use crate::step_interface::{AnnotatedSample, Sample};
    points
        .iter()
        .map(|&(magnitude, time_ms)| {
            AnnotatedSample::new(
                Sample::new(magnitude, 0.0, 0.0, time_ms * 1_000_000),
                magnitude,
                time_ms,
            )
        })
        .collect()
}
