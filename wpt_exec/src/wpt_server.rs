//! # Waypoint Server
//!
//! The waypoint server publishes the lookahead window computed each cycle onto the window feed,
//! where it is picked up by the downstream trajectory follower. One message is sent per
//! processed cycle, including cycles where the window is empty - an empty window is the
//! degraded-mode output, not a transmission failure.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions};

use crate::path::Window;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Lookahead window publisher
pub struct WptServer {
    socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum WptServerError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not send the window: {0}")]
    SendError(zmq::Error),

    #[error("Could not serialize the window: {0}")]
    SerializationError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl WptServer {
    /// Create a new instance of the waypoint server.
    ///
    /// This function will not block until a subscriber connects.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, WptServerError> {
        // Create the socket options
        let socket_options = SocketOptions {
            block_on_first_connect: false,
            bind: true,
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
        let socket = MonitoredSocket::new(ctx, zmq::PUB, socket_options, &params.wpt_endpoint)
            .map_err(WptServerError::SocketError)?;

        // Create self
        Ok(Self { socket })
    }

    /// Publish the given window on the feed.
    pub fn send(&mut self, window: &Window) -> Result<(), WptServerError> {
        // Build the wire lane, stamped at publication
        let lane = window.to_lane();

        // Serialize the lane
        let lane_string =
            serde_json::to_string(&lane).map_err(WptServerError::SerializationError)?;

        // Send it
        self.socket
            .send(&lane_string, 0)
            .map_err(WptServerError::SendError)
    }
}
