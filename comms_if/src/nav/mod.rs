//! # Navigation Data Feed Messages
//!
//! Wire definitions for the three navigation feeds used by the waypoint
//! executable:
//!
//! - The pose feed, on which the localisation system streams [`PoseSample`]s.
//! - The base path feed, on which the route planner delivers the full
//!   [`WaypointLane`] to follow. A new lane replaces the previous one
//!   wholesale.
//! - The lookahead window feed, on which `wpt_exec` publishes the bounded
//!   forward [`WaypointLane`] for the downstream trajectory follower.
//!
//! All messages are serialised as JSON strings over the network layer in
//! [`crate::net`].

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{serde::ts_milliseconds, DateTime, Utc};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single sample of the vehicle's pose in the world frame.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct PoseSample {
    /// The position in the world frame.
    ///
    /// Units: meters
    pub position_m: [f64; 3],

    /// The attitude of the vehicle in the world frame, as a unit quaternion
    /// in `[x, y, z, w]` order.
    pub attitude_q: [f64; 4],
}

/// A single waypoint: a position on the route and the nominal longitudinal
/// speed the vehicle should hold through it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct Waypoint {
    /// The position in the world frame.
    ///
    /// Units: meters
    pub position_m: [f64; 3],

    /// The nominal longitudinal target speed at this waypoint.
    ///
    /// Units: meters/second
    pub speed_ms: f64,
}

/// An ordered sequence of waypoints.
///
/// Used both for the base path feed (the full route, ordered by arc length)
/// and for the lookahead window feed (a bounded forward slice of the route).
/// Waypoint order is meaningful and must be preserved by all consumers.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WaypointLane {
    /// UTC timestamp at which the lane was produced.
    #[serde(with = "ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    /// The waypoints making up the lane, in route order.
    pub waypoints: Vec<Waypoint>,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl WaypointLane {
    /// Create a new lane from the given waypoints, stamped with the current time.
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self {
            timestamp: Utc::now(),
            waypoints,
        }
    }

    /// Get the number of waypoints in the lane.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// True if the lane contains no waypoints.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}
