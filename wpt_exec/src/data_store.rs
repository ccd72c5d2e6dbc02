//! # Data Store

use crate::wpt_ctrl;
use crate::path::Window;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    // WptCtrl
    pub wpt_ctrl: wpt_ctrl::WptCtrl,
    pub wpt_ctrl_output: Window,
    pub wpt_ctrl_status_rpt: wpt_ctrl::StatusReport,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,

    /// Number of cycles skipped because the pose or base path was not yet set
    pub num_skipped_cycles: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, and sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        self.is_1_hz_cycle = self.num_cycles % (cycle_frequency_hz as u128) == 0;

        self.wpt_ctrl_output = Window::default();
        self.wpt_ctrl_status_rpt = wpt_ctrl::StatusReport::default();
    }
}
