//! Main waypoint executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Snapshot acquisition from the state store (pose and base path)
//!         - Waypoint control processing (locate, window, cap)
//!         - Lookahead window publication
//!
//! Pose and base path updates arrive asynchronously on their feeds and are written into the
//! state store by the client background threads. The main loop is a fixed-period cyclic
//! executor: if either snapshot is missing at the start of a cycle the whole cycle is skipped
//! and nothing is published, the next cycle simply retries from current state.
//!
//! # Modules
//!
//! All processing modules (e.g. `wpt_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use wpt_lib::{
    data_store::DataStore,
    params::WptExecParams,
    path_client::PathClient,
    pose_client::PoseClient,
    signals::{NoSignals, SignalSource},
    state_store::StateStore,
    wpt_ctrl,
    wpt_server::WptServer,
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, trace, warn};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use comms_if::net::NetParams;
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("wpt_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Waypoint Executable\n");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let net_params: NetParams =
        util::params::load("net.toml").wrap_err("Could not load net params")?;

    let exec_params: WptExecParams =
        util::params::load("wpt_exec.toml").wrap_err("Could not load exec params")?;

    let cycle_period_s = exec_params.cycle_period_s;
    let cycle_frequency_hz = 1.0 / cycle_period_s;

    info!("Exec parameters loaded");
    info!("    Cycle period: {} s", cycle_period_s);

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.wpt_ctrl
        .init("wpt_ctrl.toml", &session)
        .wrap_err("Failed to initialise WptCtrl")?;
    info!("WptCtrl init complete");

    info!("Module initialisation complete\n");

    // ---- INITIALISE NETWORK ----

    info!("Initialising network");

    let zmq_ctx = comms_if::net::zmq::Context::new();

    // State store shared between the client background threads and this loop
    let store = Arc::new(StateStore::new());

    let _pose_client = PoseClient::new(&zmq_ctx, &net_params, store.clone())
        .wrap_err("Failed to initialise the PoseClient")?;
    info!("PoseClient initialised");

    let _path_client = PathClient::new(&zmq_ctx, &net_params, store.clone())
        .wrap_err("Failed to initialise the PathClient")?;
    info!("PathClient initialised");

    let mut wpt_server =
        WptServer::new(&zmq_ctx, &net_params).wrap_err("Failed to initialise the WptServer")?;
    info!("WptServer initialised");

    info!("Network initialisation complete");

    // ---- SIGNAL SOURCE ----

    // No-op until the traffic and obstacle feeds exist
    let mut signal_source: Box<dyn SignalSource> = Box::new(NoSignals);

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(cycle_frequency_hz);

        // ---- DATA INPUT ----

        let (pose, base_path) = store.snapshot();

        // ---- PROCESSING ----

        match (pose, base_path) {
            (Some(pose), Some(base_path)) => {
                trace!(
                    "Current pose: ({:.2}, {:.2})",
                    pose.position_m[0],
                    pose.position_m[1]
                );

                let input = wpt_ctrl::InputData {
                    pose,
                    path: base_path,
                    traffic_wpt_index: signal_source.traffic_wpt_index(),
                    obstacle_wpt_index: signal_source.obstacle_wpt_index(),
                };

                match ds.wpt_ctrl.proc(&input) {
                    Ok((o, r)) => {
                        ds.wpt_ctrl_output = o;
                        ds.wpt_ctrl_status_rpt = r;
                    }
                    Err(e) => warn!("Error during WptCtrl processing: {}", e),
                };

                if ds.wpt_ctrl_status_rpt.degraded && ds.is_1_hz_cycle {
                    warn!("No waypoint ahead of the vehicle, publishing empty windows");
                }

                // ---- OUTPUT ----

                match wpt_server.send(&ds.wpt_ctrl_output) {
                    Ok(_) => (),
                    Err(e) => warn!("WptServer error: {}", e),
                };
            }
            _ => {
                // Not ready yet - skip the cycle without publishing
                ds.num_skipped_cycles += 1;

                if ds.is_1_hz_cycle {
                    debug!("Waiting for pose and base path, cycle skipped");
                }
            }
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(cycle_period_s).checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period_s
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }
}
