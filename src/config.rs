use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub synthesizer: SynthesizerConfig,
}

#[derive(Debug, Clone)]
pub struct SynthesizerConfig {
    /// Number of interior points interpolated between origin and destination
    /// when a request does not override it.
    pub interior_point_count: usize,

    /// Peak perpendicular displacement of the path bow, as a fraction of the
    /// origin-destination span in degree space.
    pub curve_strength_factor: f64,

    /// Per-axis random jitter half-width, as a fraction of the
    /// origin-destination span.
    pub jitter_factor: f64,

    /// Baseline of the synthetic AQI curve.
    pub aqi_base: f64,

    /// Amplitude of the sinusoidal AQI bump over the baseline.
    pub aqi_amplitude: f64,

    /// Half-width of the uniform noise added to each AQI sample.
    pub aqi_noise: f64,

    /// Lower clamp of synthetic AQI samples.
    pub aqi_floor: f64,

    /// Upper clamp of synthetic AQI samples.
    pub aqi_ceiling: f64,

    /// Number of candidate paths generated when a request prefers low AQI.
    /// The candidate with the lowest average AQI wins.
    pub candidate_count: usize,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            interior_point_count: DEFAULT_INTERIOR_POINT_COUNT,
            curve_strength_factor: DEFAULT_CURVE_STRENGTH_FACTOR,
            jitter_factor: DEFAULT_JITTER_FACTOR,
            aqi_base: DEFAULT_AQI_BASE,
            aqi_amplitude: DEFAULT_AQI_AMPLITUDE,
            aqi_noise: DEFAULT_AQI_NOISE,
            aqi_floor: DEFAULT_AQI_FLOOR,
            aqi_ceiling: DEFAULT_AQI_CEILING,
            candidate_count: DEFAULT_CANDIDATE_COUNT,
        }
    }
}

impl SynthesizerConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            interior_point_count: env::var("ROUTE_INTERIOR_POINT_COUNT")
                .unwrap_or_else(|_| defaults.interior_point_count.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_INTERIOR_POINT_COUNT")?,

            curve_strength_factor: env::var("ROUTE_CURVE_STRENGTH_FACTOR")
                .unwrap_or_else(|_| defaults.curve_strength_factor.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_CURVE_STRENGTH_FACTOR")?,

            jitter_factor: env::var("ROUTE_JITTER_FACTOR")
                .unwrap_or_else(|_| defaults.jitter_factor.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_JITTER_FACTOR")?,

            aqi_base: env::var("ROUTE_AQI_BASE")
                .unwrap_or_else(|_| defaults.aqi_base.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_AQI_BASE")?,

            aqi_amplitude: env::var("ROUTE_AQI_AMPLITUDE")
                .unwrap_or_else(|_| defaults.aqi_amplitude.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_AQI_AMPLITUDE")?,

            aqi_noise: env::var("ROUTE_AQI_NOISE")
                .unwrap_or_else(|_| defaults.aqi_noise.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_AQI_NOISE")?,

            aqi_floor: env::var("ROUTE_AQI_FLOOR")
                .unwrap_or_else(|_| defaults.aqi_floor.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_AQI_FLOOR")?,

            aqi_ceiling: env::var("ROUTE_AQI_CEILING")
                .unwrap_or_else(|_| defaults.aqi_ceiling.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_AQI_CEILING")?,

            candidate_count: env::var("ROUTE_CANDIDATE_COUNT")
                .unwrap_or_else(|_| defaults.candidate_count.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_CANDIDATE_COUNT")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_INTERIOR_POINT_COUNT..=MAX_INTERIOR_POINT_COUNT)
            .contains(&self.interior_point_count)
        {
            return Err(format!(
                "ROUTE_INTERIOR_POINT_COUNT must be between {} and {}",
                MIN_INTERIOR_POINT_COUNT, MAX_INTERIOR_POINT_COUNT
            ));
        }
        if self.curve_strength_factor < 0.0 || self.curve_strength_factor > 0.5 {
            return Err("ROUTE_CURVE_STRENGTH_FACTOR must be between 0 and 0.5".to_string());
        }
        if self.jitter_factor < 0.0 || self.jitter_factor > 0.1 {
            return Err("ROUTE_JITTER_FACTOR must be between 0 and 0.1".to_string());
        }
        if self.aqi_floor > self.aqi_ceiling {
            return Err("ROUTE_AQI_FLOOR must not exceed ROUTE_AQI_CEILING".to_string());
        }
        if !(0.0..=500.0).contains(&self.aqi_floor) || !(0.0..=500.0).contains(&self.aqi_ceiling) {
            return Err("AQI clamps must lie on the 0-500 scale".to_string());
        }
        if self.aqi_noise < 0.0 {
            return Err("ROUTE_AQI_NOISE must not be negative".to_string());
        }
        if !(1..=MAX_CANDIDATE_COUNT).contains(&self.candidate_count) {
            return Err(format!(
                "ROUTE_CANDIDATE_COUNT must be between 1 and {}",
                MAX_CANDIDATE_COUNT
            ));
        }
        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            synthesizer: SynthesizerConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn defaults_are_valid() {
        assert!(SynthesizerConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_aqi_clamps() {
        let config = SynthesizerConfig {
            aqi_floor: 90.0,
            aqi_ceiling: 20.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_candidates() {
        let config = SynthesizerConfig {
            candidate_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn reads_overrides_from_env() {
        std::env::set_var("ROUTE_INTERIOR_POINT_COUNT", "40");
        std::env::set_var("ROUTE_CANDIDATE_COUNT", "5");

        let config = SynthesizerConfig::from_env().unwrap();
        assert_eq!(config.interior_point_count, 40);
        assert_eq!(config.candidate_count, 5);

        std::env::remove_var("ROUTE_INTERIOR_POINT_COUNT");
        std::env::remove_var("ROUTE_CANDIDATE_COUNT");
    }

    #[test]
    #[serial]
    fn rejects_unparsable_env_value() {
        std::env::set_var("ROUTE_INTERIOR_POINT_COUNT", "plenty");
        assert!(SynthesizerConfig::from_env().is_err());
        std::env::remove_var("ROUTE_INTERIOR_POINT_COUNT");
    }
}
