//! # Waypoint Executable Parameters
//!
//! This module provides parameters for the waypoint executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
pub struct WptExecParams {
    /// Target period of one processing cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,
}
