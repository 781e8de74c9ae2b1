//! Approximation strategies.
//!
//! Every strategy is a pure `f64 -> f64` function. Each submodule groups
//! one *method* across the families it covers:
//!
//! - [`sqrt`]: bit-trick inverse square root
//! - [`piecewise`]: f32 range reduction + three Horner branches
//! - [`taylor`]: f64 range reduction + order 16/17 Taylor polynomials
//! - [`poly`]: cheapest polynomials (low order trig, minimax inverse trig)
//! - [`lookup`]: table lookups with linear interpolation
//! - [`reference`]: `libm`, used whenever accuracy beats speed
//!
//! `floor` lives here directly since it has a single implementation.

pub mod lookup;
pub mod piecewise;
pub mod poly;
pub mod reference;
pub mod sqrt;
pub mod taylor;

use std::f64::consts::PI;

pub(crate) const TWO_PI: f64 = 2.0 * PI;
pub(crate) const HALF_PI: f64 = PI / 2.0;

/// Doubles at or above this magnitude have no fractional bits.
const INTEGRAL_THRESHOLD: f64 = 4_503_599_627_370_496.0; // 2^52

/// Fast floor.
///
/// Truncates toward zero through an integer cast, then steps down by one for
/// negative non-integers. NaN and infinities come back unchanged, as does
/// any value too large to have a fractional part.
#[inline]
pub fn floor(x: f64) -> f64 {
    if x.is_nan() || x.is_infinite() {
        return x;
    }
    if x.abs() >= INTEGRAL_THRESHOLD {
        return x;
    }

    let truncated = x as i64 as f64;
    if x < 0.0 && x != truncated {
        truncated - 1.0
    } else {
        truncated
    }
}

/// Reduce an angle into `(-π, π]` using `x - 2π * floor(x / 2π)`.
#[inline]
pub(crate) fn normalize_angle(x: f64) -> f64 {
    let x = x - TWO_PI * (x * (1.0 / TWO_PI)).floor();
    if x > PI {
        x - TWO_PI
    } else if x <= -PI {
        x + TWO_PI
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_positive_and_negative() {
        assert_eq!(floor(3.9), 3.0);
        assert_eq!(floor(3.0), 3.0);
        assert_eq!(floor(-3.1), -4.0);
        assert_eq!(floor(-3.0), -3.0);
        assert_eq!(floor(0.5), 0.0);
        assert_eq!(floor(-0.5), -1.0);
    }

    #[test]
    fn floor_special_values() {
        assert!(floor(f64::NAN).is_nan());
        assert_eq!(floor(f64::INFINITY), f64::INFINITY);
        assert_eq!(floor(f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert_eq!(floor(1e300), 1e300);
        assert_eq!(floor(-1e300), -1e300);
        assert_eq!(floor(-4_503_599_627_370_497.0), -4_503_599_627_370_497.0);
    }

    #[test]
    fn floor_matches_std() {
        let mut x = -1000.0;
        while x < 1000.0 {
            assert_eq!(floor(x), x.floor(), "x={x}");
            x += 0.173;
        }
    }

    #[test]
    fn normalize_angle_range() {
        for i in -2000..2000 {
            let x = i as f64 * 0.37;
            let n = normalize_angle(x);
            assert!(n > -PI - 1e-12 && n <= PI + 1e-12, "x={x} n={n}");
            assert!((n.sin() - x.sin()).abs() < 1e-9);
        }
    }
}
