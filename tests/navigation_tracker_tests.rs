use airpath::models::{Coordinate, PositionFix, TransportMode};
use airpath::services::navigation_tracker::{
    drive_tracker, NavigationTracker, PositionSource, SimulatedPositionSource,
    SubscriptionOptions, TrackerPhase,
};
use airpath::AppError;
use std::sync::Arc;
use std::time::Duration;

mod common;

#[test]
fn position_at_sixth_point_reports_expected_progress() {
    // 20 uniform points; standing exactly on points[5] is 5/19 of the way
    let route = common::uniform_route(50.0);
    let mut tracker = NavigationTracker::new(route).unwrap();
    tracker.start().unwrap();

    let state = tracker
        .on_position_update(PositionFix::new(0.0, 0.005))
        .unwrap();

    assert_eq!(state.current_index, 5);
    assert!(
        (state.progress_fraction - 26.3).abs() < 0.05,
        "progress {}",
        state.progress_fraction
    );
    assert_eq!(state.current_aqi, Some(50.0));
}

#[test]
fn five_instructions_partition_into_five_segments() {
    let route = common::uniform_route(50.0);

    assert_eq!(route.segments.len(), 5);

    // Concatenating segment point lists reproduces the route's points
    let concatenated: Vec<&Coordinate> = route
        .segments
        .iter()
        .flat_map(|s| route.segment_points(s).iter().map(|p| &p.coordinate))
        .collect();
    assert_eq!(concatenated.len(), route.points.len());
    for (from_segments, from_route) in concatenated.iter().zip(&route.points) {
        assert_eq!(**from_segments, from_route.coordinate);
    }
}

#[test]
fn update_after_stop_is_rejected_and_state_is_preserved() {
    let route = common::uniform_route(50.0);
    let mut tracker = NavigationTracker::new(route).unwrap();
    tracker.start().unwrap();

    let last = tracker
        .on_position_update(PositionFix::new(0.0, 0.008))
        .unwrap();
    tracker.stop();

    let result = tracker.on_position_update(PositionFix::new(0.0, 0.012));
    assert!(matches!(result, Err(AppError::TrackerState(_))));

    // The last emitted state survives untouched
    let preserved = tracker.last_state().unwrap();
    assert_eq!(preserved.current_index, last.current_index);
    assert_eq!(preserved.progress_fraction, last.progress_fraction);
}

#[test]
fn projection_matches_brute_force_reference() {
    let synthesizer = common::test_synthesizer();
    let request = common::seeded_request(
        common::c(48.8566, 2.3522),
        common::c(48.8666, 2.3722),
        TransportMode::Walking,
    );
    let route = Arc::new(synthesizer.generate_route(&request).unwrap());

    let probes = [
        common::c(48.8566, 2.3522),
        common::c(48.8600, 2.3590),
        common::c(48.8615, 2.3630),
        common::c(48.8650, 2.3700),
        common::c(48.8700, 2.3800), // past the destination
        common::c(48.8500, 2.3400), // before the origin
    ];

    for probe in probes {
        let mut tracker = NavigationTracker::new(route.clone()).unwrap();
        tracker.start().unwrap();
        let state = tracker
            .on_position_update(PositionFix::new(probe.lat, probe.lng))
            .unwrap();

        // Independent brute-force nearest point
        let expected = route
            .points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                probe
                    .distance_meters(&a.coordinate)
                    .partial_cmp(&probe.distance_meters(&b.coordinate))
                    .unwrap()
            })
            .map(|(i, _)| i)
            .unwrap();

        assert_eq!(
            state.current_index, expected,
            "probe ({}, {})",
            probe.lat, probe.lng
        );
    }
}

#[test]
fn remaining_distance_and_time_are_consistent() {
    let route = common::uniform_route(50.0);
    let total = route.total_distance_m;
    let mut tracker = NavigationTracker::new(route).unwrap();
    tracker.start().unwrap();

    let state = tracker
        .on_position_update(PositionFix::new(0.0, 0.010))
        .unwrap();

    assert!(
        (state.distance_traveled_m + state.distance_remaining_m - total).abs() < 1e-6
    );
    // Walking fallback speed
    let expected_time = state.distance_remaining_m / 1.4;
    assert!((state.time_remaining_s - expected_time).abs() < 1e-9);
}

#[test]
fn equal_aqi_endpoints_interpolate_without_drift() {
    let route = common::uniform_route(64.0);
    let mut tracker = NavigationTracker::new(route).unwrap();
    tracker.start().unwrap();

    // Positions strictly between grid points at awkward fractions
    for lng in [0.00123, 0.00457, 0.00989, 0.01701] {
        let state = tracker
            .on_position_update(PositionFix::new(0.0, lng))
            .unwrap();
        assert_eq!(state.current_aqi, Some(64.0), "drift at lng {}", lng);
    }
}

#[tokio::test]
async fn simulated_walk_completes_the_route() {
    let synthesizer = common::test_synthesizer();
    let request = common::seeded_request(
        common::c(0.0, 0.0),
        common::c(0.0, 0.01),
        TransportMode::Jogging,
    );
    let route = Arc::new(synthesizer.generate_route(&request).unwrap());

    let source = SimulatedPositionSource::new(route.clone());
    let stream = source
        .subscribe(SubscriptionOptions {
            min_interval: Duration::from_millis(1),
            min_distance_m: 0.0,
        })
        .await
        .unwrap();

    let mut tracker = NavigationTracker::new(route.clone()).unwrap();
    let final_state = drive_tracker(&mut tracker, stream).await.unwrap().unwrap();

    assert_eq!(tracker.phase(), TrackerPhase::Completed);
    assert_eq!(final_state.current_index, route.points.len() - 1);
    assert_eq!(final_state.progress_fraction, 100.0);
    assert_eq!(
        final_state.current_instruction.as_deref(),
        Some("You have reached your destination")
    );
}

#[tokio::test]
async fn segment_changes_fire_once_per_segment_over_a_full_walk() {
    let route = common::uniform_route(50.0);
    let source = SimulatedPositionSource::new(route.clone());
    let mut stream = source
        .subscribe(SubscriptionOptions {
            min_interval: Duration::from_millis(1),
            min_distance_m: 0.0,
        })
        .await
        .unwrap();

    let mut tracker = NavigationTracker::new(route.clone()).unwrap();
    tracker.start().unwrap();

    let mut changes = 0usize;
    while let Some(fix) = stream.recv().await {
        let state = tracker.on_position_update(fix).unwrap();
        if state.segment_changed {
            changes += 1;
        }
        if tracker.is_terminal() {
            break;
        }
    }

    // The walk crosses from segment 0 into segments 1..=4
    assert_eq!(changes, route.segments.len() - 1);
}
