//! Air-quality sampling seam.
//!
//! Route synthesis samples air quality through the [`AqiProvider`] trait so
//! the synthetic placeholder profile can be swapped for a real geo-indexed
//! lookup without touching path shaping, projection, or segmentation.

use crate::config::SynthesizerConfig;
use crate::constants::{DESTINATION_PLACEHOLDER_AQI, ORIGIN_PLACEHOLDER_AQI};
use crate::models::Coordinate;
use rand::{rngs::StdRng, RngExt};

pub trait AqiProvider: Send + Sync {
    /// AQI at an interior point of the path. `progress` is the point's
    /// position along the route in [0, 1]; `coordinate` is available for
    /// real geo-indexed implementations.
    fn sample(&self, coordinate: &Coordinate, progress: f64, rng: &mut StdRng) -> f64;

    /// AQI reported at the route origin.
    fn origin_aqi(&self) -> f64;

    /// AQI reported at the route destination.
    fn destination_aqi(&self) -> f64;
}

/// Placeholder profile: a sinusoidal bump over a baseline with uniform
/// noise, clamped to a configured band. Stands in for a real air-quality
/// raster; the endpoints report fixed values off the curve.
pub struct SyntheticAqiProvider {
    base: f64,
    amplitude: f64,
    noise: f64,
    floor: f64,
    ceiling: f64,
}

impl SyntheticAqiProvider {
    pub fn new(config: &SynthesizerConfig) -> Self {
        Self {
            base: config.aqi_base,
            amplitude: config.aqi_amplitude,
            noise: config.aqi_noise,
            floor: config.aqi_floor,
            ceiling: config.aqi_ceiling,
        }
    }
}

impl AqiProvider for SyntheticAqiProvider {
    fn sample(&self, _coordinate: &Coordinate, progress: f64, rng: &mut StdRng) -> f64 {
        let noise = if self.noise > 0.0 {
            rng.random_range(-self.noise..=self.noise)
        } else {
            0.0
        };
        let raw = self.base + self.amplitude * (std::f64::consts::PI * progress).sin() + noise;
        raw.clamp(self.floor, self.ceiling)
    }

    fn origin_aqi(&self) -> f64 {
        ORIGIN_PLACEHOLDER_AQI
    }

    fn destination_aqi(&self) -> f64 {
        DESTINATION_PLACEHOLDER_AQI
    }
}
