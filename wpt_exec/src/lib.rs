//! # Waypoint executable library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items
//! defined inside the waypoint executable crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Global per-cycle data store for the executable
pub mod data_store;

/// Localisation types - the vehicle's pose and heading
pub mod loc;

/// Executable-level parameters
pub mod params;

/// Base path and lookahead window types
pub mod path;

/// Path client - recieves base path updates from the route planner
pub mod path_client;

/// Pose client - recieves pose updates from the localisation system
pub mod pose_client;

/// Signal source interface - stub traffic and obstacle inputs
pub mod signals;

/// State store - latest pose and base path snapshots shared between threads
pub mod state_store;

/// Waypoint control module - computes the lookahead window of waypoints ahead of the vehicle
pub mod wpt_ctrl;

/// Waypoint server - publishes the lookahead window to the trajectory follower
pub mod wpt_server;
