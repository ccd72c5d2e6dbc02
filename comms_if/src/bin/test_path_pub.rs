//! Simple base path feed publisher test
//!
//! Publishes a straight-line base path along the +X axis every few seconds, for feeding
//! `wpt_exec` by hand.

use comms_if::nav::{Waypoint, WaypointLane};
use comms_if::net::{MonitoredSocket, SocketOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create zmq context
    let ctx = zmq::Context::new();

    // Create socket options
    let socket_options = SocketOptions {
        bind: true,
        block_on_first_connect: false,
        ..Default::default()
    };

    // Create the socket
    let socket = MonitoredSocket::new(&ctx, zmq::PUB, socket_options, "tcp://*:5031")?;

    println!("Base path publisher open on port 5031");

    // A 1 km straight path with 1 m waypoint separation, nominal speed 15 m/s
    let waypoints: Vec<Waypoint> = (0..1000)
        .map(|i| Waypoint {
            position_m: [i as f64, 0.0, 0.0],
            speed_ms: 15.0,
        })
        .collect();

    loop {
        let lane = WaypointLane::new(waypoints.clone());
        let lane_str = serde_json::to_string(&lane)?;

        match socket.send(&lane_str, 0) {
            Ok(_) => println!("Sent base path of {} waypoints", lane.len()),
            Err(e) => println!("Failed to send base path: {}", e),
        }

        std::thread::sleep(std::time::Duration::from_secs(5));
    }
}
