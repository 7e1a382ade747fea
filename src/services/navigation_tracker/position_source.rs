//! Position stream seam.
//!
//! Tracking consumes fixes from a [`PositionStream`], obtained from any
//! [`PositionSource`] implementation — a device GPS adapter in production,
//! [`SimulatedPositionSource`] in tests and demos. The stream is a scoped
//! resource: dropping it closes the channel and the producer side winds
//! down, so the underlying subscription cannot leak past tracking teardown.

use crate::error::Result;
use crate::models::{NavigationState, PositionFix, Route};
use crate::services::navigation_tracker::{NavigationTracker, TrackerPhase};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::mpsc;

/// Caller-configured delivery thresholds, mirroring what device location
/// APIs accept.
#[derive(Debug, Clone)]
pub struct SubscriptionOptions {
    /// Minimum interval between delivered fixes
    pub min_interval: Duration,
    /// Minimum movement between delivered fixes, meters
    pub min_distance_m: f64,
}

impl Default for SubscriptionOptions {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(1),
            min_distance_m: 5.0,
        }
    }
}

/// An active position subscription, delivering one fix at a time.
pub struct PositionStream {
    rx: mpsc::Receiver<PositionFix>,
}

impl PositionStream {
    pub fn new(rx: mpsc::Receiver<PositionFix>) -> Self {
        Self { rx }
    }

    /// Next fix, or `None` once the source has no more to deliver.
    pub async fn recv(&mut self) -> Option<PositionFix> {
        self.rx.recv().await
    }
}

#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Acquire a scoped position subscription.
    async fn subscribe(&self, options: SubscriptionOptions) -> Result<PositionStream>;
}

/// Replays a route's own points as position fixes at the route mode's
/// average speed. Stands in for a live GPS feed in tests and demos.
pub struct SimulatedPositionSource {
    route: Arc<Route>,
}

impl SimulatedPositionSource {
    pub fn new(route: Arc<Route>) -> Self {
        Self { route }
    }
}

#[async_trait]
impl PositionSource for SimulatedPositionSource {
    async fn subscribe(&self, options: SubscriptionOptions) -> Result<PositionStream> {
        let (tx, rx) = mpsc::channel(16);
        let route = self.route.clone();

        tokio::spawn(async move {
            let speed = route.mode.average_speed_m_per_s();
            let last_index = route.points.len().saturating_sub(1);
            let mut last_emitted: Option<usize> = None;

            for (index, point) in route.points.iter().enumerate() {
                // Honor the movement threshold, but never drop the endpoint
                if let Some(previous) = last_emitted {
                    let moved = point.cumulative_distance_m
                        - route.points[previous].cumulative_distance_m;
                    if moved < options.min_distance_m && index != last_index {
                        continue;
                    }
                }

                let fix = PositionFix {
                    lat: point.coordinate.lat,
                    lng: point.coordinate.lng,
                    speed_m_per_s: Some(speed),
                    timestamp: OffsetDateTime::now_utc(),
                };
                if tx.send(fix).await.is_err() {
                    // Subscriber dropped the stream; release quietly
                    tracing::debug!("Simulated position stream closed by subscriber");
                    return;
                }
                last_emitted = Some(index);

                if index != last_index {
                    tokio::time::sleep(options.min_interval).await;
                }
            }
        });

        Ok(PositionStream::new(rx))
    }
}

/// Serialize a stream of fixes into a tracker.
///
/// This is the single-writer loop: fixes are applied strictly in arrival
/// order, the tracker is started if still idle, and teardown runs on every
/// exit path — the stream is owned here and dropped (releasing the
/// subscription) whether the route completes, the source dries up, or an
/// update fails.
pub async fn drive_tracker(
    tracker: &mut NavigationTracker,
    mut stream: PositionStream,
) -> Result<Option<NavigationState>> {
    if tracker.phase() == TrackerPhase::Idle {
        tracker.start()?;
    }

    while let Some(fix) = stream.recv().await {
        tracker.on_position_update(fix)?;
        if tracker.is_terminal() {
            break;
        }
    }

    tracker.stop();
    Ok(tracker.last_state().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, RoutePoint, TransportMode};
    use crate::services::route_synthesizer::assemble_route;

    fn short_route() -> Arc<Route> {
        let points: Vec<RoutePoint> = (0..5)
            .map(|i| {
                let mut p =
                    RoutePoint::new(Coordinate::new(0.0, i as f64 * 0.001).unwrap());
                p.aqi = Some(40.0);
                p
            })
            .collect();
        Arc::new(assemble_route(points, TransportMode::Cycling).unwrap())
    }

    #[tokio::test]
    async fn simulated_source_drives_tracker_to_completion() {
        let route = short_route();
        let source = SimulatedPositionSource::new(route.clone());
        let stream = source
            .subscribe(SubscriptionOptions {
                min_interval: Duration::from_millis(1),
                min_distance_m: 0.0,
            })
            .await
            .unwrap();

        let mut tracker = NavigationTracker::new(route).unwrap();
        let final_state = drive_tracker(&mut tracker, stream).await.unwrap().unwrap();

        assert_eq!(tracker.phase(), TrackerPhase::Completed);
        assert_eq!(final_state.current_index, 4);
        assert_eq!(final_state.progress_fraction, 100.0);
    }

    #[tokio::test]
    async fn dropping_the_stream_stops_the_producer() {
        let route = short_route();
        let source = SimulatedPositionSource::new(route);
        let mut stream = source
            .subscribe(SubscriptionOptions {
                min_interval: Duration::from_millis(1),
                min_distance_m: 0.0,
            })
            .await
            .unwrap();

        // Take one fix, then release the subscription
        assert!(stream.recv().await.is_some());
        drop(stream);
        // Producer task exits on its next send; nothing to assert beyond
        // not hanging.
    }

    #[tokio::test]
    async fn movement_threshold_skips_close_points_but_keeps_endpoint() {
        let route = short_route();
        let source = SimulatedPositionSource::new(route.clone());
        // Threshold wider than any single hop (~111m each)
        let mut stream = source
            .subscribe(SubscriptionOptions {
                min_interval: Duration::from_millis(1),
                min_distance_m: 100_000.0,
            })
            .await
            .unwrap();

        let mut received = Vec::new();
        while let Some(fix) = stream.recv().await {
            received.push(fix);
        }

        // First point and the destination survive the filter
        assert_eq!(received.len(), 2);
        let last = received.last().unwrap();
        assert!((last.lng - 0.004).abs() < 1e-12);
    }
}
