//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For tuning knobs that benefit from runtime experimentation, see
//! [`SynthesizerConfig`](crate::config::SynthesizerConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Geometry ---

/// WGS84 semi-major axis in meters, used as the sphere radius for haversine
/// distances.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

// --- Transport mode average speeds (m/s) ---

/// Assumed average walking speed.
pub const WALKING_SPEED_M_PER_S: f64 = 1.4;
/// Assumed average jogging speed.
pub const JOGGING_SPEED_M_PER_S: f64 = 2.8;
/// Assumed average cycling speed.
pub const CYCLING_SPEED_M_PER_S: f64 = 4.2;

// --- Route synthesis structural limits ---

/// Default number of interior points interpolated between origin and
/// destination. Overridden per request or by `ROUTE_INTERIOR_POINT_COUNT`.
pub const DEFAULT_INTERIOR_POINT_COUNT: usize = 20;
/// Smallest accepted interior point count. Below this the path degenerates
/// to a straight hop and the milestone instructions collide.
pub const MIN_INTERIOR_POINT_COUNT: usize = 4;
/// Hard upper bound on interior points per request.
pub const MAX_INTERIOR_POINT_COUNT: usize = 500;

/// Index fractions along the point list that receive a turn instruction
/// (rounded down to a point index).
pub const INSTRUCTION_MILESTONE_FRACTIONS: [f64; 3] = [0.25, 0.5, 0.75];

// --- Synthetic AQI profile defaults ---
// The profile stands in for a real geo-indexed air-quality lookup; see
// `SyntheticAqiProvider`. All values are on the 0-500 AQI scale.

/// Baseline AQI of the synthetic profile curve.
pub const DEFAULT_AQI_BASE: f64 = 30.0;
/// Amplitude of the sinusoidal bump over the baseline.
pub const DEFAULT_AQI_AMPLITUDE: f64 = 20.0;
/// Half-width of the uniform noise added to each sample.
pub const DEFAULT_AQI_NOISE: f64 = 5.0;
/// Lower clamp of the synthetic profile.
pub const DEFAULT_AQI_FLOOR: f64 = 20.0;
/// Upper clamp of the synthetic profile.
pub const DEFAULT_AQI_CEILING: f64 = 80.0;
/// Fixed placeholder AQI reported at the route origin. Deliberately off the
/// synthetic curve so endpoint samples are recognizable in rendered output.
pub const ORIGIN_PLACEHOLDER_AQI: f64 = 45.0;
/// Fixed placeholder AQI reported at the route destination.
pub const DESTINATION_PLACEHOLDER_AQI: f64 = 35.0;

// --- Path shaping defaults ---

/// Peak perpendicular displacement of the path bow, as a fraction of the
/// origin-destination span. Overridden by `ROUTE_CURVE_STRENGTH_FACTOR`.
pub const DEFAULT_CURVE_STRENGTH_FACTOR: f64 = 0.01;
/// Per-axis jitter half-width, as a fraction of the origin-destination span.
/// Overridden by `ROUTE_JITTER_FACTOR`.
pub const DEFAULT_JITTER_FACTOR: f64 = 0.0003;

// --- Candidate selection ---

/// Number of candidate paths synthesized when the request prefers low AQI.
/// Overridden by `ROUTE_CANDIDATE_COUNT`.
pub const DEFAULT_CANDIDATE_COUNT: usize = 3;
/// Hard upper bound on candidates per request.
pub const MAX_CANDIDATE_COUNT: usize = 16;
/// Seed stride between candidate generations. Large and odd so consecutive
/// candidate seeds land in unrelated RNG streams.
pub const CANDIDATE_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

// --- Navigation tracking ---

/// Distances within this tolerance (meters) are treated as equal during
/// projection; ties resolve to the earliest route point.
pub const PROJECTION_EPSILON_M: f64 = 1e-6;

// --- Instruction vocabulary ---
// Fixed, enumerable instruction strings. Exposed as data so renderers and
// localization layers can enumerate every string the core will ever emit.

/// Instruction attached to the route origin.
pub const START_INSTRUCTION: &str = "Start route";
/// Instruction attached to the route destination.
pub const ARRIVAL_INSTRUCTION: &str = "You have reached your destination";
/// Actions drawn for milestone instructions.
pub const INSTRUCTION_ACTIONS: [&str; 3] = ["Turn", "Bear", "Keep"];
/// Directions drawn for milestone instructions.
pub const INSTRUCTION_DIRECTIONS: [&str; 2] = ["left", "right"];
