//! Simple pose feed publisher test
//!
//! Publishes a pose moving slowly along the +X axis, for feeding `wpt_exec` by hand.

use comms_if::nav::PoseSample;
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
    let socket = MonitoredSocket::new(&ctx, zmq::PUB, socket_options, "tcp://*:5030")?;

    println!("Pose publisher open on port 5030");

    let mut x_m = 0f64;

    // Send poses to subscribers
    loop {
        // Identity attitude points the vehicle down +X
        let pose = PoseSample {
            position_m: [x_m, 0.0, 0.0],
            attitude_q: [0.0, 0.0, 0.0, 1.0],
        };

        let pose_str = serde_json::to_string(&pose)?;

        match socket.send(&pose_str, 0) {
            Ok(_) => println!("Sent pose at x = {:.2} m", x_m),
            Err(e) => println!("Failed to send pose: {}", e),
        }

        x_m += 0.5;

        std::thread::sleep(std::time::Duration::from_millis(500));
    }
}
