use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One sample from the positioning source, as delivered. Coordinates are
/// unvalidated here; the tracker rejects malformed fixes without crashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionFix {
    pub lat: f64,
    pub lng: f64,
    /// Instantaneous speed reported by the device, if available
    #[serde(default)]
    pub speed_m_per_s: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl PositionFix {
    pub fn new(lat: f64, lng: f64) -> Self {
        PositionFix {
            lat,
            lng,
            speed_m_per_s: None,
            timestamp: OffsetDateTime::UNIX_EPOCH,
        }
    }

    pub fn with_speed(mut self, speed_m_per_s: f64) -> Self {
        self.speed_m_per_s = Some(speed_m_per_s);
        self
    }
}

/// Snapshot of tracking progress, emitted after every position update.
/// Owned by exactly one tracker and discarded when tracking stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationState {
    /// Index of the nearest route point
    pub current_index: usize,
    /// Progress along the route, 0-100
    pub progress_fraction: f64,
    pub distance_traveled_m: f64,
    pub distance_remaining_m: f64,
    pub time_remaining_s: f64,
    /// Interpolated AQI exposure at the current position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_aqi: Option<f64>,
    /// Instruction of the active segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_instruction: Option<String>,
    /// Index of the active segment in the route's segment list
    pub segment_index: usize,
    /// True only on the update where the active segment changed. Consumers
    /// key instruction announcements off this to avoid re-announcing the
    /// same instruction every tick.
    pub segment_changed: bool,
}
