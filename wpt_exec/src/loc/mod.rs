//! # Localisation module
//!
//! This module defines the vehicle's pose as used by the rest of the executable. Pose estimation
//! itself is performed by an external localisation system which streams [`PoseSample`] messages
//! on the pose feed; this module only converts those samples and derives the heading.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::nav::PoseSample;
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position and attitude in the world frame) of the vehicle.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Default)]
pub struct Pose {
    /// The position in the world frame
    pub position_m: Vector3<f64>,

    /// The attitude of the vehicle in the world frame. This is a quaternion that will rotate an
    /// object from the world frame into the vehicle body frame.
    pub attitude_q: UnitQuaternion<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    /// Return the heading (angle to the positive world X axis) of the vehicle in radians.
    ///
    /// Heading is the yaw angle of the intrinsic euler decomposition of the attitude, given in
    /// the range [-pi, pi].
    pub fn get_heading(&self) -> f64 {
        self.attitude_q.euler_angles().2
    }

    /// True if all components of the pose are finite.
    pub fn is_finite(&self) -> bool {
        self.position_m.iter().all(|p| p.is_finite())
            && self.attitude_q.coords.iter().all(|q| q.is_finite())
    }
}

impl From<PoseSample> for Pose {
    fn from(sample: PoseSample) -> Self {
        // Wire order is [x, y, z, w], nalgebra's constructor takes w first. The sample is
        // renormalised on conversion so small wire rounding errors don't accumulate.
        let [qx, qy, qz, qw] = sample.attitude_q;

        Self {
            position_m: Vector3::new(
                sample.position_m[0],
                sample.position_m[1],
                sample.position_m[2],
            ),
            attitude_q: UnitQuaternion::from_quaternion(Quaternion::new(qw, qx, qy, qz)),
        }
    }
}

#[cfg(test)]
mod test {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn test_get_heading() {
        // Identity attitude points down +X
        let pose = Pose::default();
        assert!(pose.get_heading().abs() < 1e-12);

        // Pure yaw rotations come straight back out
        for yaw in [-PI / 2.0, -0.3, 0.5, PI / 2.0].iter() {
            let pose = Pose {
                position_m: Vector3::zeros(),
                attitude_q: UnitQuaternion::from_euler_angles(0.0, 0.0, *yaw),
            };
            assert!((pose.get_heading() - yaw).abs() < 1e-12);
        }
    }

    #[test]
    fn test_from_sample() {
        // 90 degree yaw about +Z in [x, y, z, w] order
        let half_sqrt2 = 0.5f64.sqrt();
        let sample = PoseSample {
            position_m: [1.0, 2.0, 3.0],
            attitude_q: [0.0, 0.0, half_sqrt2, half_sqrt2],
        };

        let pose = Pose::from(sample);

        assert_eq!(pose.position_m, Vector3::new(1.0, 2.0, 3.0));
        assert!((pose.get_heading() - PI / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_is_finite() {
        assert!(Pose::default().is_finite());

        let pose = Pose {
            position_m: Vector3::new(0.0, f64::NAN, 0.0),
            attitude_q: UnitQuaternion::identity(),
        };
        assert!(!pose.is_finite());
    }
}
