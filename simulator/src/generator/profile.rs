use anyhow::{ensure, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use stepcore::Sample;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// One stretch of steady gait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaitSegment {
    #[serde(default)]
    pub label: Option<String>,
    pub duration_s: f64,
    /// Steps per second.
    pub cadence_hz: f64,
    /// Height of the vertical impulse each footfall adds, in m/s².
    pub peak_accel: f64,
    /// Fraction of each step period occupied by the impulse.
    #[serde(default = "default_duty_cycle")]
    pub duty_cycle: f64,
}

fn default_duty_cycle() -> f64 {
    0.3
}

/// Configuration for generating a synthetic accelerometer session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitProfile {
    pub sample_rate_hz: f64,
    /// Resting reading on the vertical axis.
    pub gravity: f64,
    /// Half-width of the uniform noise added to every axis.
    pub noise: f64,
    pub seed: u64,
    pub segments: Vec<GaitSegment>,
}

impl Default for GaitProfile {
    fn default() -> Self {
        Self {
            sample_rate_hz: 50.0,
            gravity: 9.8,
            noise: 0.2,
            seed: 0,
            segments: vec![
                GaitSegment {
                    label: Some("walk".into()),
                    duration_s: 20.0,
                    cadence_hz: 1.4,
                    peak_accel: 10.0,
                    duty_cycle: 0.3,
                },
                GaitSegment {
                    label: Some("jog".into()),
                    duration_s: 20.0,
                    cadence_hz: 1.6,
                    peak_accel: 20.0,
                    duty_cycle: 0.3,
                },
                GaitSegment {
                    label: Some("run".into()),
                    duration_s: 20.0,
                    cadence_hz: 1.8,
                    peak_accel: 36.0,
                    duty_cycle: 0.25,
                },
            ],
        }
    }
}

impl GaitProfile {
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.sample_rate_hz.is_finite() && self.sample_rate_hz > 0.0,
            "sample_rate_hz must be positive, got {}",
            self.sample_rate_hz
        );
        ensure!(
            self.noise.is_finite() && self.noise >= 0.0,
            "noise must be non-negative, got {}",
            self.noise
        );
        for (index, segment) in self.segments.iter().enumerate() {
            ensure!(
                segment.duration_s.is_finite() && segment.duration_s >= 0.0,
                "segment {} has invalid duration {}",
                index,
                segment.duration_s
            );
            ensure!(
                segment.cadence_hz.is_finite() && segment.cadence_hz > 0.0,
                "segment {} has invalid cadence {}",
                index,
                segment.cadence_hz
            );
            ensure!(
                segment.duty_cycle > 0.0 && segment.duty_cycle <= 1.0,
                "segment {} duty_cycle must lie in (0, 1], got {}",
                index,
                segment.duty_cycle
            );
        }
        Ok(())
    }

    pub fn duration_s(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_s).sum()
    }
}

/// Half-sine impulse at the start of every step period.
fn footfall(segment: &GaitSegment, local_time_s: f64) -> f64 {
    let phase = (local_time_s * segment.cadence_hz).fract();
    if phase < segment.duty_cycle {
        segment.peak_accel * (PI * phase / segment.duty_cycle).sin()
    } else {
        0.0
    }
}

pub fn build_samples(profile: &GaitProfile) -> anyhow::Result<Vec<Sample>> {
    profile.validate().context("validating gait profile")?;

    let mut rng = StdRng::seed_from_u64(profile.seed);
    let jitter = |rng: &mut StdRng| {
        if profile.noise > 0.0 {
            rng.gen_range(-profile.noise..profile.noise)
        } else {
            0.0
        }
    };

    let dt = 1.0 / profile.sample_rate_hz;
    let mut samples = Vec::with_capacity((profile.duration_s() * profile.sample_rate_hz) as usize);
    let mut index: u64 = 0;

    for segment in &profile.segments {
        let count = (segment.duration_s * profile.sample_rate_hz).round() as u64;
        for local_index in 0..count {
            let local_time_s = local_index as f64 * dt;
            let timestamp_ns = (index as f64 * dt * NANOS_PER_SECOND) as i64;
            let vertical = profile.gravity + footfall(segment, local_time_s);
            samples.push(Sample::new(
                jitter(&mut rng),
                jitter(&mut rng),
                vertical + jitter(&mut rng),
                timestamp_ns,
            ));
            index = index
                .checked_add(1)
                .context("overflow counting generated samples")?;
        }
    }

    Ok(samples)
}
