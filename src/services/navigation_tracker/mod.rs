pub mod position_source;

pub use position_source::{
    drive_tracker, PositionSource, PositionStream, SimulatedPositionSource, SubscriptionOptions,
};

use crate::constants::PROJECTION_EPSILON_M;
use crate::error::{AppError, Result};
use crate::models::{Coordinate, NavigationState, PositionFix, Route};
use crate::services::geometry;
use std::sync::Arc;

/// Tracker lifecycle. `Completed` and `Exited` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    Idle,
    Tracking,
    Completed,
    Exited,
}

/// Single-writer navigation state machine.
///
/// Consumes one position fix at a time against an immutable route and emits
/// a fresh [`NavigationState`] per update. Performs no internal locking:
/// callers feeding fixes from multiple tasks must serialize them (see
/// [`drive_tracker`]). The tracker never times out on its own; teardown is
/// always explicit via [`stop`](NavigationTracker::stop) or completion.
pub struct NavigationTracker {
    route: Arc<Route>,
    phase: TrackerPhase,
    last_state: Option<NavigationState>,
    last_segment: Option<usize>,
}

impl NavigationTracker {
    /// Gate construction on a usable route: fewer than 2 points cannot be
    /// projected onto.
    pub fn new(route: Arc<Route>) -> Result<Self> {
        if route.points.len() < 2 {
            return Err(AppError::InvalidRoute(format!(
                "tracking needs a route with at least 2 points, got {}",
                route.points.len()
            )));
        }
        Ok(Self {
            route,
            phase: TrackerPhase::Idle,
            last_state: None,
            last_segment: None,
        })
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, TrackerPhase::Completed | TrackerPhase::Exited)
    }

    /// Last state emitted, if any. Survives into terminal phases so
    /// consumers can render the final snapshot.
    pub fn last_state(&self) -> Option<&NavigationState> {
        self.last_state.as_ref()
    }

    /// Idle -> Tracking. Returns the initial state anchored at the route
    /// origin.
    pub fn start(&mut self) -> Result<NavigationState> {
        if self.phase != TrackerPhase::Idle {
            return Err(AppError::TrackerState(format!(
                "cannot start tracking from {:?}",
                self.phase
            )));
        }
        self.phase = TrackerPhase::Tracking;

        let state = self.state_at_index(0, None);
        self.last_segment = Some(state.segment_index);
        self.last_state = Some(state.clone());

        tracing::info!(
            route_id = %self.route.id,
            "Navigation started: {} points, {:.1}m",
            self.route.points.len(),
            self.route.total_distance_m
        );
        Ok(state)
    }

    /// Project a position fix onto the route and emit the updated state.
    ///
    /// A malformed fix is logged and swallowed: the previous state is
    /// returned unchanged rather than crashing the tracker. Once the
    /// destination point wins the projection the tracker completes, and
    /// further updates are no-ops returning the final state.
    pub fn on_position_update(&mut self, fix: PositionFix) -> Result<NavigationState> {
        match self.phase {
            TrackerPhase::Idle => {
                return Err(AppError::TrackerState(
                    "tracker not started; call start() before feeding fixes".to_string(),
                ))
            }
            TrackerPhase::Exited => {
                return Err(AppError::TrackerState(
                    "tracker stopped; position updates are rejected".to_string(),
                ))
            }
            TrackerPhase::Completed => {
                // Route already finished; keep returning the final snapshot.
                let last_index = self.route.points.len() - 1;
                return Ok(self
                    .last_state
                    .clone()
                    .unwrap_or_else(|| self.state_at_index(last_index, None)));
            }
            TrackerPhase::Tracking => {}
        }

        let position = match Coordinate::new(fix.lat, fix.lng) {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!(
                    "Malformed position fix ({}), keeping previous state",
                    e
                );
                return Ok(self
                    .last_state
                    .clone()
                    .unwrap_or_else(|| self.state_at_index(0, None)));
            }
        };

        let nearest = self.project_onto_route(&position)?;
        let state = self.state_at_index(nearest, Some(&fix));

        let segment_changed = state.segment_changed;
        self.last_segment = Some(state.segment_index);
        self.last_state = Some(state.clone());

        if segment_changed {
            tracing::debug!(
                segment = state.segment_index,
                instruction = ?state.current_instruction,
                "Segment changed"
            );
        }

        if nearest == self.route.points.len() - 1 {
            self.phase = TrackerPhase::Completed;
            tracing::info!(
                route_id = %self.route.id,
                "Destination reached after {:.1}m",
                self.route.total_distance_m
            );
        }

        Ok(state)
    }

    /// Explicit teardown. Any non-terminal phase transitions to Exited;
    /// calling it on a terminal tracker is a no-op so teardown is safe on
    /// every exit path.
    pub fn stop(&mut self) {
        match self.phase {
            TrackerPhase::Idle | TrackerPhase::Tracking => {
                self.phase = TrackerPhase::Exited;
                tracing::info!(route_id = %self.route.id, "Navigation stopped");
            }
            TrackerPhase::Completed | TrackerPhase::Exited => {}
        }
    }

    /// Index of the route point nearest to the position. Distances within
    /// tolerance of each other are ties and resolve to the earliest index,
    /// so an ambiguous fix cannot jump the tracker ahead.
    fn project_onto_route(&self, position: &Coordinate) -> Result<usize> {
        let points = &self.route.points;
        if points.is_empty() {
            // Unreachable past the constructor gate; kept as a guard.
            return Err(AppError::Projection("route has no points".to_string()));
        }

        let mut best_index = 0usize;
        let mut best_distance = position.distance_meters(&points[0].coordinate);
        for (index, point) in points.iter().enumerate().skip(1) {
            let distance = position.distance_meters(&point.coordinate);
            if distance + PROJECTION_EPSILON_M < best_distance {
                best_index = index;
                best_distance = distance;
            }
        }
        Ok(best_index)
    }

    /// Build the state for the nearest index `j`, interpolating AQI between
    /// `j` and `j+1` by relative distance when a live fix is available.
    fn state_at_index(&self, index: usize, fix: Option<&PositionFix>) -> NavigationState {
        let route = &self.route;
        let points = &route.points;
        let last_index = points.len() - 1;

        let progress_fraction = if last_index == 0 {
            100.0
        } else {
            (index as f64 / last_index as f64).clamp(0.0, 1.0) * 100.0
        };
        let distance_traveled_m = route.total_distance_m * progress_fraction / 100.0;
        let distance_remaining_m = route.total_distance_m - distance_traveled_m;

        let effective_speed = fix
            .and_then(|f| f.speed_m_per_s)
            .filter(|speed| speed.is_finite() && *speed > 0.0)
            .unwrap_or_else(|| route.mode.average_speed_m_per_s());
        let time_remaining_s = distance_remaining_m / effective_speed;

        let current_aqi = self.aqi_at(index, fix);

        let segment_index = route.segment_index_for(index).unwrap_or(0);
        let current_instruction = route
            .segments
            .get(segment_index)
            .map(|s| s.instruction.clone())
            .filter(|i| !i.is_empty());
        let segment_changed = self.last_segment != Some(segment_index);

        NavigationState {
            current_index: index,
            progress_fraction,
            distance_traveled_m,
            distance_remaining_m,
            time_remaining_s,
            current_aqi,
            current_instruction,
            segment_index,
            segment_changed,
        }
    }

    fn aqi_at(&self, index: usize, fix: Option<&PositionFix>) -> Option<f64> {
        let points = &self.route.points;
        let last_index = points.len() - 1;

        if index == last_index {
            return points[index].aqi;
        }

        let position = match fix.and_then(|f| Coordinate::new(f.lat, f.lng).ok()) {
            Some(position) => position,
            None => return points[index].aqi,
        };

        match (points[index].aqi, points[index + 1].aqi) {
            (Some(a1), Some(a2)) => {
                let d1 = position.distance_meters(&points[index].coordinate);
                let d2 = position.distance_meters(&points[index + 1].coordinate);
                if d1 + d2 == 0.0 {
                    // Both hops zero: the fix sits on two coincident points
                    return Some(a1);
                }
                Some(geometry::interpolate(a1, a2, d1 / (d1 + d2)))
            }
            _ => points[index].aqi,
        }
    }
}
