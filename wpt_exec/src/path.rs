//! # Path
//!
//! This module defines the base path the vehicle is to follow and the lookahead window extracted
//! from it each cycle.
//!
//! The base path is an ordered sequence of waypoints, each a position plus the nominal
//! longitudinal speed through that position. Points are ordered by arc length along the route,
//! so index adjacency implies spatial adjacency, and the order is never changed once the path is
//! built. The window is a bounded contiguous forward slice of the path. Extracting a window
//! always copies the waypoints, so capping window speeds can never write through to the base
//! path snapshot held by the state store.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// Internal
use comms_if::nav::{Waypoint, WaypointLane};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single point on the base path.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct PathPoint {
    /// The position of the point in the world frame.
    ///
    /// Units: meters
    pub position_m: Vector3<f64>,

    /// The nominal longitudinal target speed at this point.
    ///
    /// Units: meters/second
    pub speed_ms: f64,
}

/// The base path defining the desired route of the vehicle.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Path {
    pub points: Vec<PathPoint>,
}

/// A lookahead window: a bounded forward slice of the base path.
///
/// Windows are ephemeral, one is produced and published each processing cycle and then
/// discarded. The points are copies, modifying them does not modify the path they were
/// extracted from.
#[derive(Clone, Serialize, Debug, Default)]
pub struct Window {
    pub points: Vec<PathPoint>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Path {
    /// Get the number of points in the path
    pub fn get_num_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if every point in the path has finite position and speed.
    pub fn is_finite(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.position_m.iter().all(|c| c.is_finite()) && p.speed_ms.is_finite())
    }

    /// Extract the lookahead window starting at the given index.
    ///
    /// The window contains at most `max_points` points and is clamped to the end of the path,
    /// near the end of the route the window is simply shorter. The points are copied out of the
    /// path.
    pub fn extract_window(&self, start_index: usize, max_points: usize) -> Window {
        let start = start_index.min(self.points.len());
        let end = start_index
            .saturating_add(max_points)
            .min(self.points.len());

        Window {
            points: self.points[start..end].to_vec(),
        }
    }
}

impl From<&WaypointLane> for Path {
    fn from(lane: &WaypointLane) -> Self {
        Self {
            points: lane
                .waypoints
                .iter()
                .map(|wp| PathPoint {
                    position_m: Vector3::new(
                        wp.position_m[0],
                        wp.position_m[1],
                        wp.position_m[2],
                    ),
                    speed_ms: wp.speed_ms,
                })
                .collect(),
        }
    }
}

impl Window {
    /// Get the number of points in the window
    pub fn get_num_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Cap the speed of every point in the window to the given maximum.
    ///
    /// Idempotent: re-capping an already capped window changes nothing.
    pub fn cap_speeds(&mut self, max_speed_ms: f64) {
        for point in self.points.iter_mut() {
            point.speed_ms = point.speed_ms.min(max_speed_ms);
        }
    }

    /// Convert the window into a wire lane message, stamped with the current time.
    pub fn to_lane(&self) -> WaypointLane {
        WaypointLane::new(
            self.points
                .iter()
                .map(|p| Waypoint {
                    position_m: [p.position_m[0], p.position_m[1], p.position_m[2]],
                    speed_ms: p.speed_ms,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Build a straight path along +X with the given speeds.
    fn path_with_speeds(speeds: &[f64]) -> Path {
        Path {
            points: speeds
                .iter()
                .enumerate()
                .map(|(i, s)| PathPoint {
                    position_m: Vector3::new(i as f64, 0.0, 0.0),
                    speed_ms: *s,
                })
                .collect(),
        }
    }

    #[test]
    fn test_window_bound() {
        let path = path_with_speeds(&[10.0; 5]);

        // Window length is min(max_points, num_points - start) for every valid start
        for start in 0..5 {
            for max_points in 1..8 {
                let window = path.extract_window(start, max_points);
                assert_eq!(window.get_num_points(), max_points.min(5 - start));
            }
        }
    }

    #[test]
    fn test_window_end_of_path() {
        let path = path_with_speeds(&[10.0; 5]);

        // Starting on the last point gives exactly one point, no wraparound or padding
        let window = path.extract_window(4, 3);
        assert_eq!(window.get_num_points(), 1);
        assert_eq!(window.points[0].position_m[0], 4.0);

        // A start beyond the end gives an empty window
        assert!(path.extract_window(5, 3).is_empty());
    }

    #[test]
    fn test_window_preserves_order() {
        let path = path_with_speeds(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        let window = path.extract_window(1, 3);
        let speeds: Vec<f64> = window.points.iter().map(|p| p.speed_ms).collect();
        assert_eq!(speeds, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_cap_does_not_mutate_path() {
        let path = path_with_speeds(&[10.0, 12.0, 6.0]);

        let mut window = path.extract_window(0, 3);
        window.cap_speeds(8.0);

        // The window is capped
        let speeds: Vec<f64> = window.points.iter().map(|p| p.speed_ms).collect();
        assert_eq!(speeds, vec![8.0, 8.0, 6.0]);

        // The original path is untouched
        let path_speeds: Vec<f64> = path.points.iter().map(|p| p.speed_ms).collect();
        assert_eq!(path_speeds, vec![10.0, 12.0, 6.0]);
    }

    #[test]
    fn test_cap_idempotent() {
        let path = path_with_speeds(&[10.0, 7.5, 9.0]);

        let mut once = path.extract_window(0, 3);
        once.cap_speeds(8.0);

        let mut twice = once.clone();
        twice.cap_speeds(8.0);

        let once_speeds: Vec<f64> = once.points.iter().map(|p| p.speed_ms).collect();
        let twice_speeds: Vec<f64> = twice.points.iter().map(|p| p.speed_ms).collect();
        assert_eq!(once_speeds, twice_speeds);
    }

    #[test]
    fn test_is_finite() {
        let mut path = path_with_speeds(&[10.0, 12.0]);
        assert!(path.is_finite());

        path.points[1].speed_ms = std::f64::INFINITY;
        assert!(!path.is_finite());

        path.points[1].speed_ms = 12.0;
        path.points[0].position_m[2] = std::f64::NAN;
        assert!(!path.is_finite());
    }

    #[test]
    fn test_lane_conversions() {
        let lane = WaypointLane::new(vec![
            comms_if::nav::Waypoint {
                position_m: [1.0, 2.0, 3.0],
                speed_ms: 4.0,
            },
            comms_if::nav::Waypoint {
                position_m: [5.0, 6.0, 7.0],
                speed_ms: 8.0,
            },
        ]);

        let path = Path::from(&lane);
        assert_eq!(path.get_num_points(), 2);
        assert_eq!(path.points[1].position_m, Vector3::new(5.0, 6.0, 7.0));
        assert_eq!(path.points[1].speed_ms, 8.0);

        // Out through a full window and back to a lane, order intact
        let out = path.extract_window(0, 2).to_lane();
        assert_eq!(out.waypoints[0].position_m, [1.0, 2.0, 3.0]);
        assert_eq!(out.waypoints[1].speed_ms, 8.0);
    }
}
