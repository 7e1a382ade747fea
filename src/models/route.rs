use crate::constants::{
    CYCLING_SPEED_M_PER_S, JOGGING_SPEED_M_PER_S, MAX_INTERIOR_POINT_COUNT,
    MIN_INTERIOR_POINT_COUNT, WALKING_SPEED_M_PER_S,
};
use crate::models::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Walking,
    Jogging,
    Cycling,
}

impl TransportMode {
    /// Assumed average speed for the mode, in meters per second
    pub fn average_speed_m_per_s(&self) -> f64 {
        match self {
            TransportMode::Walking => WALKING_SPEED_M_PER_S,
            TransportMode::Jogging => JOGGING_SPEED_M_PER_S,
            TransportMode::Cycling => CYCLING_SPEED_M_PER_S,
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Walking => write!(f, "walking"),
            TransportMode::Jogging => write!(f, "jogging"),
            TransportMode::Cycling => write!(f, "cycling"),
        }
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walk" | "walking" => Ok(TransportMode::Walking),
            "jog" | "jogging" | "run" | "running" => Ok(TransportMode::Jogging),
            "cycle" | "cycling" | "bike" | "bicycle" => Ok(TransportMode::Cycling),
            _ => Err(format!("Invalid transport mode: '{}'", s)),
        }
    }
}

/// One waypoint of a synthesized route.
///
/// `cumulative_distance_m` is monotonically non-decreasing along the point
/// list and zero at the first point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePoint {
    pub coordinate: Coordinate,
    /// Air-quality index at this point (0-500 scale)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aqi: Option<f64>,
    /// Turn instruction attached to this point, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    pub cumulative_distance_m: f64,
    pub cumulative_time_s: f64,
}

impl RoutePoint {
    pub fn new(coordinate: Coordinate) -> Self {
        RoutePoint {
            coordinate,
            aqi: None,
            instruction: None,
            cumulative_distance_m: 0.0,
            cumulative_time_s: 0.0,
        }
    }
}

/// A contiguous run of route points sharing one instruction.
///
/// Segments partition the route's points completely: `start_index` of each
/// segment is one past the previous segment's `end_index`, the first segment
/// starts at 0 and the last ends at the final point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSegment {
    /// First point index covered by this segment (inclusive)
    pub start_index: usize,
    /// Last point index covered by this segment (inclusive)
    pub end_index: usize,
    /// Instruction shared by the segment's points
    pub instruction: String,
    /// Distance covered from the previous segment boundary to this segment's
    /// last point. Summing over all segments reproduces the route total.
    pub distance_m: f64,
    pub time_s: f64,
    /// Arithmetic mean AQI over the segment's points, if any carry a value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_aqi: Option<f64>,
}

impl RouteSegment {
    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }
}

/// An immutable synthesized route. Created once per navigation session and
/// shared read-only with trackers and renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub mode: TransportMode,
    pub points: Vec<RoutePoint>,
    pub segments: Vec<RouteSegment>,
    pub total_distance_m: f64,
    pub total_duration_s: f64,
    /// Mean AQI over all points carrying a value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_aqi: Option<f64>,
}

impl Route {
    /// Points covered by a segment, as a slice of the route's point list.
    pub fn segment_points(&self, segment: &RouteSegment) -> &[RoutePoint] {
        &self.points[segment.start_index..=segment.end_index]
    }

    /// Index of the segment containing the given point index.
    pub fn segment_index_for(&self, point_index: usize) -> Option<usize> {
        self.segments.iter().position(|s| s.contains(point_index))
    }
}

// Request/Response types for API endpoints

#[derive(Debug, Clone, Deserialize)]
pub struct SynthesizeRouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    #[serde(default)]
    pub mode: TransportMode,
    /// When set, several candidate paths are synthesized and the one with
    /// the lowest average AQI is returned.
    #[serde(default)]
    pub prefer_low_aqi: bool,
    /// Override for the configured interior point count
    #[serde(default)]
    pub interior_point_count: Option<usize>,
    /// Explicit RNG seed, for reproducible generation
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SynthesizeRouteRequest {
    pub fn validate(&self) -> Result<(), String> {
        // Coordinates arrive via serde with no constructor validation
        Coordinate::new(self.origin.lat, self.origin.lng)
            .map_err(|e| format!("origin: {}", e))?;
        Coordinate::new(self.destination.lat, self.destination.lng)
            .map_err(|e| format!("destination: {}", e))?;
        if let Some(count) = self.interior_point_count {
            if !(MIN_INTERIOR_POINT_COUNT..=MAX_INTERIOR_POINT_COUNT).contains(&count) {
                return Err(format!(
                    "interior_point_count must be between {} and {}",
                    MIN_INTERIOR_POINT_COUNT, MAX_INTERIOR_POINT_COUNT
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub route: Route,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_mode_speeds() {
        assert_eq!(TransportMode::Walking.average_speed_m_per_s(), 1.4);
        assert_eq!(TransportMode::Jogging.average_speed_m_per_s(), 2.8);
        assert_eq!(TransportMode::Cycling.average_speed_m_per_s(), 4.2);
    }

    #[test]
    fn test_transport_mode_display() {
        assert_eq!(TransportMode::Walking.to_string(), "walking");
        assert_eq!(TransportMode::Jogging.to_string(), "jogging");
        assert_eq!(TransportMode::Cycling.to_string(), "cycling");
    }

    #[test]
    fn test_transport_mode_from_str() {
        assert_eq!(
            "walk".parse::<TransportMode>().unwrap(),
            TransportMode::Walking
        );
        assert_eq!(
            "WALKING".parse::<TransportMode>().unwrap(),
            TransportMode::Walking
        );
        assert_eq!(
            "run".parse::<TransportMode>().unwrap(),
            TransportMode::Jogging
        );
        assert_eq!(
            "bike".parse::<TransportMode>().unwrap(),
            TransportMode::Cycling
        );
        assert!("teleport".parse::<TransportMode>().is_err());
    }

    #[test]
    fn test_transport_mode_default() {
        assert_eq!(TransportMode::default(), TransportMode::Walking);
    }

    #[test]
    fn test_request_validation_rejects_bad_coordinates() {
        let request = SynthesizeRouteRequest {
            origin: Coordinate { lat: 95.0, lng: 0.0 },
            destination: Coordinate { lat: 0.0, lng: 0.0 },
            mode: TransportMode::Walking,
            prefer_low_aqi: false,
            interior_point_count: None,
            seed: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_validation_rejects_bad_point_count() {
        let request = SynthesizeRouteRequest {
            origin: Coordinate { lat: 0.0, lng: 0.0 },
            destination: Coordinate { lat: 0.0, lng: 0.01 },
            mode: TransportMode::Walking,
            prefer_low_aqi: false,
            interior_point_count: Some(1),
            seed: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_segment_contains() {
        let segment = RouteSegment {
            start_index: 5,
            end_index: 9,
            instruction: "Turn left".to_string(),
            distance_m: 0.0,
            time_s: 0.0,
            average_aqi: None,
        };
        assert!(!segment.contains(4));
        assert!(segment.contains(5));
        assert!(segment.contains(9));
        assert!(!segment.contains(10));
    }
}
