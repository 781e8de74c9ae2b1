//! Cheapest polynomial strategies.
//!
//! Trig uses a short Taylor polynomial after folding to `[-π/2, π/2]`.
//! Inverse trig uses minimax fits from Abramowitz & Stegun (4.4.45 and
//! 4.4.49), evaluated in Horner form.

use std::f64::consts::PI;

use super::{normalize_angle, HALF_PI};

/// Seventh-order sine, abs error below 2e-4.
#[inline]
pub fn sin(x: f64) -> f64 {
    let mut x = normalize_angle(x);
    if x > HALF_PI {
        x = PI - x;
    } else if x < -HALF_PI {
        x = -PI - x;
    }
    let x2 = x * x;
    x * (1.0 - x2 * (1.0 / 6.0 - x2 * (1.0 / 120.0 - x2 * (1.0 / 5_040.0))))
}

/// `sin(x + π/2)`.
#[inline]
pub fn cos(x: f64) -> f64 {
    sin(x + HALF_PI)
}

#[inline]
pub fn tan(x: f64) -> f64 {
    sin(x) / cos(x)
}

/// Minimax arcsine, abs error below 7e-5.
///
/// NaN outside `[-1, 1]`; exactly `±π/2` at `±1`.
#[inline]
pub fn asin(x: f64) -> f64 {
    if !(-1.0..=1.0).contains(&x) {
        return f64::NAN;
    }
    if x == 1.0 {
        return HALF_PI;
    }
    if x == -1.0 {
        return -HALF_PI;
    }

    let a = x.abs();
    let root = (1.0 - a).sqrt();
    let result = HALF_PI - root * (1.570_728_8 + a * (-0.212_114_4 + a * (0.074_261_0 + a * -0.018_729_3)));
    if x < 0.0 {
        -result
    } else {
        result
    }
}

/// `π/2 - asin(x)`.
#[inline]
pub fn acos(x: f64) -> f64 {
    HALF_PI - asin(x)
}

/// Minimax arctangent on `[0, 1]`.
#[inline]
fn atan_unit(z: f64) -> f64 {
    let z2 = z * z;
    let a1 = -0.333_331_452_8;
    let a2 = 0.199_935_508_5;
    let a3 = -0.142_088_994_4;
    let a4 = 0.106_562_639_3;
    let a5 = -0.075_289_640_0;
    let a6 = 0.042_909_613_8;
    let a7 = -0.016_165_736_7;
    let a8 = 0.002_866_225_7;

    z * (1.0 + z2 * (a1 + z2 * (a2 + z2 * (a3 + z2 * (a4 + z2 * (a5 + z2 * (a6 + z2 * (a7 + z2 * a8))))))))
}

/// Polynomial arctangent, abs error below 1e-7.
///
/// For `|x| > 1` uses `atan(x) = π/2 - atan(1/x)`.
#[inline]
pub fn atan(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    let a = x.abs();
    let angle = if a > 1.0 {
        HALF_PI - atan_unit(1.0 / a)
    } else {
        atan_unit(a)
    };
    angle.copysign(x)
}
