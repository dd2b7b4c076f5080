use log::{debug, warn};

/// Thin wrapper over the `log` facade so every pipeline message shares a target.
pub struct LogManager {
    target: &'static str,
}

impl LogManager {
    pub fn new() -> Self {
        Self {
            target: "stepcore",
        }
    }

    pub fn record(&self, message: &str) {
        debug!(target: self.target, "{}", message);
    }

    pub fn reject(&self, message: &str) {
        warn!(target: self.target, "{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
