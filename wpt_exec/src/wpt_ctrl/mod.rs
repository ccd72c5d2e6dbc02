//! # Waypoint control module
//!
//! Waypoint control computes the lookahead window published to the trajectory follower: the
//! bounded forward slice of the base path starting at the waypoint nearest to, and ahead of,
//! the vehicle.
//!
//! Processing each cycle is a three stage pipeline:
//!
//! 1. Locate the base path waypoint which is ahead of the vehicle (positive projection of its
//!    displacement onto the vehicle's heading) and closest to it in the ground plane.
//! 2. Extract the window of at most `lookahead_count` waypoints starting there, clamped to the
//!    end of the path.
//! 3. Cap each window waypoint's target speed to the configured maximum.
//!
//! If no waypoint is ahead of the vehicle the module produces an empty window, which is still
//! published - the downstream follower treats zero guidance points as a degraded mode rather
//! than a stale window.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during WptCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum WptCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(util::params::LoadError),
}
