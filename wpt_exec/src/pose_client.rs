//! # Pose Client
//!
//! The pose client subscribes to the pose feed published by the localisation system. A
//! background thread recieves [`PoseSample`] messages and replaces the pose snapshot in the
//! [`StateStore`], superseding the previous sample. The cyclic executor never blocks on the
//! feed - it just reads whatever snapshot is current when its cycle starts.

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

use log::{error, trace, warn};

use comms_if::{
    nav::PoseSample,
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
};

use crate::loc::Pose;
use crate::state_store::StateStore;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The pose feed client
pub struct PoseClient {
    _bg_jh: JoinHandle<()>,
    bg_run: Arc<AtomicBool>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PoseClientError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PoseClient {
    /// Create a new instance of the pose client, spawning its background recieve thread.
    pub fn new(
        ctx: &zmq::Context,
        params: &NetParams,
        store: Arc<StateStore>,
    ) -> Result<Self, PoseClientError> {
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
        let socket = MonitoredSocket::new(ctx, zmq::SUB, socket_options, &params.pose_endpoint)
            .map_err(PoseClientError::SocketError)?;

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

impl Drop for PoseClient {
    fn drop(&mut self) {
        self.bg_run.store(false, Ordering::Relaxed);
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Background thread, updates the pose snapshot in the store when the localisation system
/// publishes a new sample.
fn bg_thread(socket: MonitoredSocket, run: Arc<AtomicBool>, store: Arc<StateStore>) {
    // While instructed to run
    while run.load(Ordering::Relaxed) {
        // Read string from the socket
        let msg = match socket.recv_string(0) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => {
                warn!("Non UTF-8 message on the pose feed");
                continue;
            }
            Err(zmq::Error::EAGAIN) => continue,
            Err(e) => {
                error!("Error recieving from the pose feed: {:?}", e);
                break;
            }
        };

        // Deserialize the message
        let sample: PoseSample = match serde_json::from_str(&msg) {
            Ok(s) => s,
            Err(e) => {
                warn!("Error deserialising pose sample: {:?}", e);
                continue;
            }
        };

        // Replace the snapshot in the store, keeping the previous one if the sample is invalid
        match store.set_pose(Pose::from(sample)) {
            Ok(()) => trace!(
                "New pose: ({:.2}, {:.2})",
                sample.position_m[0],
                sample.position_m[1]
            ),
            Err(e) => warn!("{}", e),
        }
    }
}
