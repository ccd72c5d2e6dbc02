//! Simple lookahead window feed subscriber test
//!
//! Subscribes to the window feed published by `wpt_exec` and prints a summary of each message.

use comms_if::nav::WaypointLane;
use comms_if::net::{MonitoredSocket, SocketOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create zmq context
    let ctx = zmq::Context::new();

    // Create socket options
    let socket_options = SocketOptions {
        block_on_first_connect: false,
        ..Default::default()
    };

    // Create the socket
    let socket = MonitoredSocket::new(&ctx, zmq::SUB, socket_options, "tcp://localhost:5032")?;

    println!("Listening for lookahead windows on port 5032");

    loop {
        let msg = match socket.recv_string(0) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => {
                println!("Recieved non UTF-8 message");
                continue;
            }
            Err(e) => {
                println!("Recv error: {}", e);
                continue;
            }
        };

        let lane: WaypointLane = match serde_json::from_str(&msg) {
            Ok(l) => l,
            Err(e) => {
                println!("Could not deserialise window: {}", e);
                continue;
            }
        };

        match lane.waypoints.first() {
            Some(first) => println!(
                "[{}] window of {} waypoints, first at ({:.2}, {:.2}) doing {:.2} m/s",
                lane.timestamp,
                lane.len(),
                first.position_m[0],
                first.position_m[1],
                first.speed_ms
            ),
            None => println!("[{}] empty window (degraded)", lane.timestamp),
        }
    }
}
