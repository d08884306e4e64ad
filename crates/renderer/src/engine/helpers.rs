// SPDX-License-Identifier: MIT

//!
//! Helper functions
//!

/// Linear interpolation between `a` and `b`
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Where `value` sits between `a` and `b` (0 at `a`, 1 at `b`)
pub(crate) fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    (value - a) / (b - a)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(100.0, 200.0, 0.0), 100.0);
        assert_eq!(lerp(100.0, 200.0, 0.25), 125.0);
        assert_eq!(lerp(100.0, 200.0, 1.0), 200.0);
        assert_eq!(lerp(200.0, 100.0, 0.5), 150.0);
    }

    #[test]
    fn test_inverse_lerp() {
        assert_eq!(inverse_lerp(5.0, 9.0, 5.0), 0.0);
        assert_eq!(inverse_lerp(5.0, 9.0, 6.0), 0.25);
        assert_eq!(inverse_lerp(5.0, 9.0, 9.0), 1.0);
        assert_eq!(inverse_lerp(-10.0, 10.0, 0.0), 0.5);
    }
}
