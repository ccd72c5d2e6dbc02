//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of meters per second in one mile per hour.
pub const ONE_MPH_MS: f64 = 0.44704;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert a speed in miles per hour into meters per second.
///
/// Speed limits and operator-facing parameters are quoted in mph, all
/// internal calculations are in SI units.
pub fn mph_to_ms<T>(speed_mph: T) -> T
where
    T: Float
{
    speed_mph * T::from(ONE_MPH_MS).unwrap()
}

/// Return the euclidian norm (distance between) of two points.
///
/// If the points do not have the same number of dimentions then `None` is
/// returned.
pub fn norm<T>(point_0: &[T], point_1: &[T]) -> Option<T>
where
    T: Float + std::ops::AddAssign
{
    // Check that the dimentions match
    if point_0.len() != point_1.len() {
        return None;
    }

    // Sum all elements of the points
    let mut sum = T::from(0).unwrap();

    for i in 0..point_0.len() {
        sum += (point_0[i] - point_1[i]).powi(2);
    }

    // Return the squareroot of the sum
    Some(sum.sqrt())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_norm() {
        assert_eq!(norm(&[0f64, 0f64], &[3f64, 4f64]), Some(5f64));
        assert_eq!(norm(&[1f64], &[1f64, 0f64]), None);
        assert_eq!(norm(&[-1f64, -1f64], &[-1f64, -1f64]), Some(0f64));
    }

    #[test]
    fn test_mph_to_ms() {
        assert!((mph_to_ms(20f64) - 8.9408).abs() < 1e-9);
        assert_eq!(mph_to_ms(0f64), 0f64);
    }
}
