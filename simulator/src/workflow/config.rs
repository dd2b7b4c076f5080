use crate::generator::GaitProfile;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stepcore::DetectorConfig;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub detector: DetectorConfig,
    pub profile: GaitProfile,
    /// Process the trailing partial batch once the session ends.
    pub flush: bool,
    /// Wall-clock milliseconds at sample timestamp zero. Replayed sessions
    /// use this fixed origin instead of the host clock.
    pub epoch_ms: i64,
}

/// Command-line overrides applied on top of a loaded or default workflow.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub batch_size: Option<usize>,
    pub min_step_interval_ms: Option<i64>,
    pub disable_gravity_filter: bool,
    pub flush: bool,
    pub seed: Option<u64>,
    pub epoch_ms: Option<i64>,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if let Some(batch_size) = overrides.batch_size {
            self.detector.batch_size = batch_size;
        }
        if let Some(interval) = overrides.min_step_interval_ms {
            self.detector.min_step_interval_ms = interval;
        }
        if overrides.disable_gravity_filter {
            self.detector.gravity_filter_enabled = false;
        }
        if let Some(seed) = overrides.seed {
            self.profile.seed = seed;
        }
        if let Some(epoch_ms) = overrides.epoch_ms {
            self.epoch_ms = epoch_ms;
        }
        self.flush |= overrides.flush;
        self
    }
}
