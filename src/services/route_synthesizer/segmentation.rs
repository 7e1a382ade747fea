//! Partition a route's point list into instruction segments.

use crate::models::{RoutePoint, RouteSegment};

/// Split points into contiguous segments, one per active instruction. A new
/// segment opens at every point carrying a non-empty instruction different
/// from the open segment's.
///
/// Invariant: segments cover the point list contiguously and completely —
/// the first starts at index 0, each starts one past its predecessor's end,
/// the last ends at the final point. Segment distance/time are measured from
/// the previous segment boundary, so their sums reproduce the route totals.
pub fn partition_into_segments(points: &[RoutePoint]) -> Vec<RouteSegment> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut open_start = 0usize;
    let mut open_instruction = points[0].instruction.clone().unwrap_or_default();

    for (index, point) in points.iter().enumerate().skip(1) {
        if let Some(instruction) = &point.instruction {
            if !instruction.is_empty() && *instruction != open_instruction {
                segments.push(build_segment(points, open_start, index - 1, &open_instruction));
                open_start = index;
                open_instruction = instruction.clone();
            }
        }
    }
    segments.push(build_segment(
        points,
        open_start,
        points.len() - 1,
        &open_instruction,
    ));

    segments
}

fn build_segment(
    points: &[RoutePoint],
    start_index: usize,
    end_index: usize,
    instruction: &str,
) -> RouteSegment {
    // Distance/time are anchored at the previous segment's last point so
    // the hop onto this segment is attributed to it; segment sums then
    // telescope to the route totals.
    let anchor = start_index.saturating_sub(1);
    let distance_m =
        points[end_index].cumulative_distance_m - points[anchor].cumulative_distance_m;
    let time_s = points[end_index].cumulative_time_s - points[anchor].cumulative_time_s;

    let aqi_values: Vec<f64> = points[start_index..=end_index]
        .iter()
        .filter_map(|p| p.aqi)
        .collect();
    let average_aqi = if aqi_values.is_empty() {
        None
    } else {
        Some(aqi_values.iter().sum::<f64>() / aqi_values.len() as f64)
    };

    RouteSegment {
        start_index,
        end_index,
        instruction: instruction.to_string(),
        distance_m,
        time_s,
        average_aqi,
    }
}
