//! Waypoint control module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;
use std::sync::Arc;

// Internal
use super::{Params, WptCtrlError};
use crate::loc::Pose;
use crate::path::{Path, Window};
use util::{maths::norm, module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Waypoint control module state
#[derive(Default)]
pub struct WptCtrl {
    params: Params,

    report: StatusReport,
}

/// Input data to Waypoint Control.
pub struct InputData {
    /// The latest vehicle pose.
    pub pose: Pose,

    /// The base path snapshot to window.
    pub path: Arc<Path>,

    /// Index of the base path waypoint at which the next traffic signal requires a stop, if any.
    ///
    /// Accepted but not yet folded into the speed computation.
    pub traffic_wpt_index: Option<usize>,

    /// Index of the first base path waypoint blocked by an obstacle, if any.
    ///
    /// Accepted but not yet folded into the speed computation.
    pub obstacle_wpt_index: Option<usize>,
}

/// Status report for WptCtrl processing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    /// Index of the nearest-ahead waypoint chosen as the window start, or `None` if no waypoint
    /// is ahead of the vehicle.
    pub nearest_wpt_index: Option<usize>,

    /// Planar distance from the vehicle to the chosen waypoint.
    ///
    /// Units: meters
    pub nearest_wpt_dist_m: Option<f64>,

    /// Number of waypoints in the produced window.
    pub window_num_points: usize,

    /// True if no waypoint was ahead of the vehicle and an empty window was produced.
    pub degraded: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for WptCtrl {
    type InitData = &'static str;
    type InitError = WptCtrlError;

    type InputData = InputData;
    type OutputData = Window;
    type StatusReport = StatusReport;
    type ProcError = WptCtrlError;

    /// Initialise the WptCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        // Load the parameters
        self.params = match params::load(init_data) {
            Ok(p) => p,
            Err(e) => return Err(WptCtrlError::ParamLoadError(e))
        };

        Ok(())
    }

    /// Perform cyclic processing of Waypoint Control.
    ///
    /// Processing involves:
    ///  1. Finding the nearest waypoint ahead of the vehicle.
    ///  2. Extracting the lookahead window from that waypoint.
    ///  3. Capping the window speeds to the maximum.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();

        // Traffic and obstacle inputs are interface stubs for now, they do not affect the
        // window until the braking profile work is in place.
        if input_data.traffic_wpt_index.is_some() || input_data.obstacle_wpt_index.is_some() {
            trace!(
                "Ignoring signal inputs (traffic: {:?}, obstacle: {:?})",
                input_data.traffic_wpt_index,
                input_data.obstacle_wpt_index
            );
        }

        let window = match find_nearest_ahead(&input_data.pose, &input_data.path) {
            Some((index, dist_m)) => {
                self.report.nearest_wpt_index = Some(index);
                self.report.nearest_wpt_dist_m = Some(dist_m);

                // Window points are copies, capping them leaves the base path snapshot untouched
                let mut window = input_data
                    .path
                    .extract_window(index, self.params.lookahead_count);
                window.cap_speeds(self.params.max_speed_ms);

                window
            }
            None => {
                // Nothing ahead of the vehicle, publish zero guidance points rather than a stale
                // window
                self.report.degraded = true;
                Window::default()
            }
        };

        self.report.window_num_points = window.get_num_points();

        trace!(
            "WptCtrl output: {} waypoints from index {:?}",
            self.report.window_num_points,
            self.report.nearest_wpt_index
        );

        Ok((window, self.report))
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Find the base path waypoint nearest to the vehicle among those ahead of it.
///
/// A waypoint is ahead if the projection of its displacement from the vehicle onto the heading
/// direction is strictly positive, so waypoints exactly abeam of the vehicle are excluded.
/// Distance is planar (z is ignored), and of two equidistant waypoints the lower index wins.
///
/// Returns the index of the chosen waypoint and the planar distance to it, or `None` if the
/// path is empty or no waypoint is ahead.
///
/// This is a full linear scan of the path. Base paths are at most a few thousand waypoints and
/// the scan runs once per cycle, see `benches/bench_nearest_ahead.rs` for the cost.
pub fn find_nearest_ahead(pose: &Pose, path: &Path) -> Option<(usize, f64)> {
    let yaw_rad = pose.get_heading();
    let heading = (yaw_rad.cos(), yaw_rad.sin());

    let car_x_m = pose.position_m[0];
    let car_y_m = pose.position_m[1];

    let mut nearest: Option<(usize, f64)> = None;

    for (i, point) in path.points.iter().enumerate() {
        let dx_m = point.position_m[0] - car_x_m;
        let dy_m = point.position_m[1] - car_y_m;

        // Strictly positive projection onto the heading, points abeam or behind are excluded
        let is_ahead = dx_m * heading.0 + dy_m * heading.1 > 0.0;
        if !is_ahead {
            continue;
        }

        // The unwrap here is safe since both slices are two dimensional
        let dist_m = norm(&[car_x_m, car_y_m], &[point.position_m[0], point.position_m[1]])
            .unwrap();

        // Strict less-than means the first of two equidistant waypoints is kept
        match nearest {
            Some((_, nearest_dist_m)) if dist_m >= nearest_dist_m => (),
            _ => nearest = Some((i, dist_m)),
        }
    }

    nearest
}

#[cfg(test)]
mod test {
    use nalgebra::{UnitQuaternion, Vector3};
    use std::f64::consts::PI;

    use super::*;
    use crate::path::PathPoint;

    /// Pose at the given position with the given heading.
    fn pose_at(x_m: f64, y_m: f64, yaw_rad: f64) -> Pose {
        Pose {
            position_m: Vector3::new(x_m, y_m, 0.0),
            attitude_q: UnitQuaternion::from_euler_angles(0.0, 0.0, yaw_rad),
        }
    }

    /// Straight path along +X: points at (0,0), (1,0), (2,0), all at 10 m/s.
    fn straight_path() -> Path {
        Path {
            points: (0..3)
                .map(|i| PathPoint {
                    position_m: Vector3::new(i as f64, 0.0, 0.0),
                    speed_ms: 10.0,
                })
                .collect(),
        }
    }

    /// A WptCtrl with the given params, bypassing file loading.
    fn wpt_ctrl(lookahead_count: usize, max_speed_ms: f64) -> WptCtrl {
        WptCtrl {
            params: Params {
                lookahead_count,
                max_speed_ms,
            },
            report: StatusReport::default(),
        }
    }

    fn input(pose: Pose, path: Path) -> InputData {
        InputData {
            pose,
            path: Arc::new(path),
            traffic_wpt_index: None,
            obstacle_wpt_index: None,
        }
    }

    #[test]
    fn test_behind_never_selected() {
        // Single point directly behind the vehicle, very close - never chosen
        let path = Path {
            points: vec![PathPoint {
                position_m: Vector3::new(-0.1, 0.0, 0.0),
                speed_ms: 10.0,
            }],
        };

        assert!(find_nearest_ahead(&pose_at(0.0, 0.0, 0.0), &path).is_none());
    }

    #[test]
    fn test_abeam_excluded() {
        // A point exactly on the perpendicular has zero projection and is not ahead
        let path = Path {
            points: vec![PathPoint {
                position_m: Vector3::new(0.0, 3.0, 0.0),
                speed_ms: 10.0,
            }],
        };

        assert!(find_nearest_ahead(&pose_at(0.0, 0.0, 0.0), &path).is_none());
    }

    #[test]
    fn test_nearest_of_ahead_points() {
        // Vehicle between points 1 and 2, heading +X: only 2 is ahead even though 1 is closer
        let (index, dist_m) =
            find_nearest_ahead(&pose_at(1.2, 0.0, 0.0), &straight_path()).unwrap();
        assert_eq!(index, 2);
        assert!((dist_m - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_tie_break_lower_index() {
        // Two ahead points equidistant from the vehicle, the lower index wins
        let path = Path {
            points: vec![
                PathPoint {
                    position_m: Vector3::new(1.0, 1.0, 0.0),
                    speed_ms: 10.0,
                },
                PathPoint {
                    position_m: Vector3::new(1.0, -1.0, 0.0),
                    speed_ms: 10.0,
                },
            ],
        };

        let (index, _) = find_nearest_ahead(&pose_at(0.0, 0.0, 0.0), &path).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_z_ignored_for_distance() {
        // A large height offset must not affect the planar distance comparison
        let path = Path {
            points: vec![
                PathPoint {
                    position_m: Vector3::new(1.0, 0.0, 100.0),
                    speed_ms: 10.0,
                },
                PathPoint {
                    position_m: Vector3::new(2.0, 0.0, 0.0),
                    speed_ms: 10.0,
                },
            ],
        };

        let (index, dist_m) = find_nearest_ahead(&pose_at(0.0, 0.0, 0.0), &path).unwrap();
        assert_eq!(index, 0);
        assert!((dist_m - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_path() {
        let path = Path { points: vec![] };
        assert!(find_nearest_ahead(&pose_at(0.0, 0.0, 0.0), &path).is_none());
    }

    #[test]
    fn test_proc_window_capped() {
        // Vehicle at the first point heading +X with a 2 point window and an 8 m/s cap: the
        // point under the vehicle is not strictly ahead, so the window is points 1 and 2, both
        // capped from 10 to 8
        let mut ctrl = wpt_ctrl(2, 8.0);

        let input = input(pose_at(0.0, 0.0, 0.0), straight_path());
        let (window, report) = ctrl.proc(&input).unwrap();

        assert_eq!(report.nearest_wpt_index, Some(1));
        assert!(!report.degraded);
        assert_eq!(window.get_num_points(), 2);
        assert_eq!(window.points[0].position_m[0], 1.0);
        assert_eq!(window.points[0].speed_ms, 8.0);
        assert_eq!(window.points[1].position_m[0], 2.0);
        assert_eq!(window.points[1].speed_ms, 8.0);

        // The base path snapshot still carries the nominal speeds
        assert!(input.path.points.iter().all(|p| p.speed_ms == 10.0));
    }

    #[test]
    fn test_proc_reversed_heading_degraded() {
        // Same path but heading -X: nothing is ahead, the window is empty and flagged degraded
        let mut ctrl = wpt_ctrl(2, 8.0);

        let (window, report) = ctrl
            .proc(&input(pose_at(0.0, 0.0, PI), straight_path()))
            .unwrap();

        assert!(window.is_empty());
        assert!(report.degraded);
        assert_eq!(report.nearest_wpt_index, None);
        assert_eq!(report.window_num_points, 0);
    }

    #[test]
    fn test_proc_window_clamped_to_path_end() {
        // Lookahead longer than the remaining path: window runs to the last point and stops
        let mut ctrl = wpt_ctrl(200, 8.0);

        let (window, report) = ctrl
            .proc(&input(pose_at(0.5, 0.0, 0.0), straight_path()))
            .unwrap();

        assert_eq!(report.nearest_wpt_index, Some(1));
        assert_eq!(window.get_num_points(), 2);
    }

    #[test]
    fn test_proc_ignores_signal_stubs() {
        // Stub traffic/obstacle inputs must not change the output
        let mut ctrl = wpt_ctrl(2, 8.0);

        let mut with_signals = input(pose_at(0.0, 0.0, 0.0), straight_path());
        with_signals.traffic_wpt_index = Some(1);
        with_signals.obstacle_wpt_index = Some(2);

        let (window, _) = ctrl.proc(&with_signals).unwrap();
        let (window_plain, _) = ctrl
            .proc(&input(pose_at(0.0, 0.0, 0.0), straight_path()))
            .unwrap();

        assert_eq!(window.get_num_points(), window_plain.get_num_points());
        for (a, b) in window.points.iter().zip(window_plain.points.iter()) {
            assert_eq!(a.position_m, b.position_m);
            assert_eq!(a.speed_ms, b.speed_ms);
        }
    }
}
