//! # Path Client
//!
//! The path client subscribes to the base path feed published by the route planner. The first
//! lane recieved is authoritative; any later delivery replaces the whole snapshot in the
//! [`StateStore`]. Updates that fail validation (empty lane, non-finite values) are rejected
//! with a warning and the previous snapshot stays in force.
//!
//! Each accepted path is also saved into the session directory for post-run analysis.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

use log::{error, info, warn};

use comms_if::{
    nav::WaypointLane,
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
};

use crate::path::Path;
use crate::state_store::StateStore;
use util::session;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The base path feed client
pub struct PathClient {
    _bg_jh: JoinHandle<()>,
    bg_run: Arc<AtomicBool>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PathClientError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PathClient {
    /// Create a new instance of the path client, spawning its background recieve thread.
    pub fn new(
        ctx: &zmq::Context,
        params: &NetParams,
        store: Arc<StateStore>,
    ) -> Result<Self, PathClientError> {
        // Create the socket options
        let socket_options = SocketOptions {
            block_on_first_connect: false,
            connect_timeout: 1000,
            heartbeat_ivl: 500,
            heartbeat_ttl: 1000,
            heartbeat_timeout: 1000,
            linger: 1,
            recv_timeout: 10,
            send_timeout: 10,
            ..Default::default()
        };

        // Connect the socket
        let socket = MonitoredSocket::new(ctx, zmq::SUB, socket_options, &params.path_endpoint)
            .map_err(PathClientError::SocketError)?;

        // Create the run flag
        let bg_run = Arc::new(AtomicBool::new(true));
        let bg_run_clone = bg_run.clone();

        // Start BG thread
        let bg_jh = thread::spawn(move || bg_thread(socket, bg_run_clone, store));

        Ok(Self {
            _bg_jh: bg_jh,
            bg_run,
        })
    }
}

impl Drop for PathClient {
    fn drop(&mut self) {
        self.bg_run.store(false, Ordering::Relaxed);
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Background thread, replaces the base path snapshot in the store when the route planner
/// publishes a new lane.
fn bg_thread(socket: MonitoredSocket, run: Arc<AtomicBool>, store: Arc<StateStore>) {
    // While instructed to run
    while run.load(Ordering::Relaxed) {
        // Read string from the socket
        let msg = match socket.recv_string(0) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => {
                warn!("Non UTF-8 message on the base path feed");
                continue;
            }
            Err(zmq::Error::EAGAIN) => continue,
            Err(e) => {
                error!("Error recieving from the base path feed: {:?}", e);
                break;
            }
        };

        // Deserialize the message
        let lane: WaypointLane = match serde_json::from_str(&msg) {
            Ok(l) => l,
            Err(e) => {
                warn!("Error deserialising base path lane: {:?}", e);
                continue;
            }
        };

        let path = Path::from(&lane);

        // Replace the snapshot in the store, keeping the previous one if the update is invalid
        match store.set_path(path.clone()) {
            Ok(()) => {
                info!("New base path of {} waypoints recieved", path.get_num_points());

                // Keep a copy of every accepted path alongside the logs
                session::save_with_timestamp("base_path/base_path.json", path);
            }
            Err(e) => warn!("{}", e),
        }
    }
}
