//! # State store
//!
//! The state store holds the latest pose and base path snapshots. Writers are the pose and path
//! client background threads, the reader is the cyclic executor in main. Each value is replaced
//! wholesale under its lock, so a cycle always observes a pose/base-path pair that was valid at
//! a single instant, never a half-written one.
//!
//! The base path is handed out as an `Arc<Path>`: a cycle keeps its snapshot alive for as long
//! as it needs it while a path update simply swaps in a new `Arc`, and no holder of a snapshot
//! can modify it.
//!
//! Malformed updates (non-finite values, empty paths) are rejected and the previous snapshot is
//! retained. "Not yet set" is a normal state, not an error - the executor skips cycles until
//! both values are present.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::sync::{Arc, RwLock};

use crate::loc::Pose;
use crate::path::Path;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Shared holder of the latest pose and base path snapshots.
#[derive(Default)]
pub struct StateStore {
    pose: RwLock<Option<Pose>>,
    path: RwLock<Option<Arc<Path>>>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Reasons an update can be rejected by the store.
#[derive(Debug, thiserror::Error)]
pub enum StateStoreError {
    #[error("Rejected pose update: non-finite position or attitude")]
    NonFinitePose,

    #[error("Rejected base path update: the path contains no points")]
    EmptyPath,

    #[error("Rejected base path update: non-finite position or speed data")]
    NonFinitePath,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held pose with a new one.
    ///
    /// Non-finite poses are rejected and the previous pose is retained.
    pub fn set_pose(&self, pose: Pose) -> Result<(), StateStoreError> {
        if !pose.is_finite() {
            return Err(StateStoreError::NonFinitePose);
        }

        let mut guard = self.pose.write().expect("StateStore: pose lock poisoned");
        *guard = Some(pose);

        Ok(())
    }

    /// Replace the held base path with a new one.
    ///
    /// Empty or non-finite paths are rejected and the previous snapshot is retained.
    pub fn set_path(&self, path: Path) -> Result<(), StateStoreError> {
        if path.is_empty() {
            return Err(StateStoreError::EmptyPath);
        }
        if !path.is_finite() {
            return Err(StateStoreError::NonFinitePath);
        }

        let mut guard = self.path.write().expect("StateStore: path lock poisoned");
        *guard = Some(Arc::new(path));

        Ok(())
    }

    /// Get the latest pose, or `None` if no pose has been recieved yet.
    pub fn pose(&self) -> Option<Pose> {
        *self.pose.read().expect("StateStore: pose lock poisoned")
    }

    /// Get the latest base path snapshot, or `None` if no path has been recieved yet.
    pub fn path(&self) -> Option<Arc<Path>> {
        self.path
            .read()
            .expect("StateStore: path lock poisoned")
            .clone()
    }

    /// Get a consistent snapshot of the latest pose and base path for one processing cycle.
    pub fn snapshot(&self) -> (Option<Pose>, Option<Arc<Path>>) {
        (self.pose(), self.path())
    }
}

#[cfg(test)]
mod test {
    use nalgebra::{UnitQuaternion, Vector3};

    use super::*;
    use crate::path::PathPoint;

    fn valid_path() -> Path {
        Path {
            points: vec![
                PathPoint {
                    position_m: Vector3::new(0.0, 0.0, 0.0),
                    speed_ms: 10.0,
                },
                PathPoint {
                    position_m: Vector3::new(1.0, 0.0, 0.0),
                    speed_ms: 10.0,
                },
            ],
        }
    }

    #[test]
    fn test_unset_state() {
        let store = StateStore::new();

        let (pose, path) = store.snapshot();
        assert!(pose.is_none());
        assert!(path.is_none());
    }

    #[test]
    fn test_set_and_get() {
        let store = StateStore::new();

        store.set_pose(Pose::default()).unwrap();
        store.set_path(valid_path()).unwrap();

        let (pose, path) = store.snapshot();
        assert!(pose.is_some());
        assert_eq!(path.unwrap().get_num_points(), 2);
    }

    #[test]
    fn test_rejects_non_finite_pose() {
        let store = StateStore::new();
        store.set_pose(Pose::default()).unwrap();

        let bad = Pose {
            position_m: Vector3::new(std::f64::NAN, 0.0, 0.0),
            attitude_q: UnitQuaternion::identity(),
        };
        assert!(store.set_pose(bad).is_err());

        // Previous pose retained
        assert!(store.pose().unwrap().is_finite());
    }

    #[test]
    fn test_rejects_bad_path_updates() {
        let store = StateStore::new();
        store.set_path(valid_path()).unwrap();

        // Empty paths are rejected
        assert!(matches!(
            store.set_path(Path { points: vec![] }),
            Err(StateStoreError::EmptyPath)
        ));

        // Non-finite paths are rejected
        let mut bad = valid_path();
        bad.points[0].speed_ms = std::f64::INFINITY;
        assert!(matches!(
            store.set_path(bad),
            Err(StateStoreError::NonFinitePath)
        ));

        // The previous snapshot is retained in both cases
        assert_eq!(store.path().unwrap().get_num_points(), 2);
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let store = StateStore::new();
        store.set_path(valid_path()).unwrap();

        // A cycle takes its snapshot...
        let snapshot = store.path().unwrap();

        // ...then an update lands with a different path
        let mut new_path = valid_path();
        new_path.points.push(PathPoint {
            position_m: Vector3::new(2.0, 0.0, 0.0),
            speed_ms: 5.0,
        });
        store.set_path(new_path).unwrap();

        // The held snapshot is unchanged, the store serves the new one
        assert_eq!(snapshot.get_num_points(), 2);
        assert_eq!(store.path().unwrap().get_num_points(), 3);
    }
}
