//! Parameters structure for WptCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Waypoint control.
#[derive(Debug, Default, Deserialize)]
pub struct Params {
    /// Maximum number of waypoints published in one lookahead window.
    ///
    /// Near the end of the base path the window is shorter.
    pub lookahead_count: usize,

    /// Ceiling applied to the target speed of every published waypoint.
    ///
    /// Units: meters/second
    pub max_speed_ms: f64,
}
