use crate::step_interface::Sample;

/// Resting gravity estimate for a device lying flat, in m/s².
pub const RESTING_GRAVITY: [f64; 3] = [0.0, 0.0, 9.8];

/// First-order low-pass that tracks the gravity vector and removes it from each
/// reading, leaving linear (motion) acceleration.
///
/// The estimate is stateful: feed one stream in chronological order and build a
/// fresh filter for every session.
#[derive(Debug, Clone)]
pub struct GravityFilter {
    alpha: f64,
    gravity: [f64; 3],
}

impl GravityFilter {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            gravity: RESTING_GRAVITY,
        }
    }

    pub fn apply(&mut self, sample: Sample) -> Sample {
        let raw = sample.axes();
        let mut linear = [0.0; 3];
        for axis in 0..3 {
            self.gravity[axis] = self.alpha * self.gravity[axis] + (1.0 - self.alpha) * raw[axis];
            linear[axis] = raw[axis] - self.gravity[axis];
        }
        Sample::new(linear[0], linear[1], linear[2], sample.timestamp_ns)
    }

    pub fn gravity(&self) -> [f64; 3] {
        self.gravity
    }
}
