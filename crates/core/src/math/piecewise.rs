//! Piecewise-polynomial sine, cosine and tangent.
//!
//! Range reduction and evaluation run in `f32`: the input is folded into
//! `[0, π/2]` and one of three odd polynomials is picked by magnitude, with
//! more correction terms the further the argument is from zero.
//! Absolute error stays below 1e-4 for `|x| <= 1024`. Past that the `f32`
//! input alone is coarser than the bound, so larger inputs go to the
//! reference sine; non-finite inputs give NaN.

use super::reference;

const TWO_PI: f32 = 6.283_185_3;
const PI: f32 = 3.141_592_7;
const HALF_PI: f32 = 1.570_796_3;
const RECIP_TWO_PI: f32 = 1.0 / TWO_PI;

// Two-part 2π: `n * TWO_PI_HI` is exact in f32 for |n| < 2^15.
const TWO_PI_HI: f32 = 6.281_25;
const TWO_PI_LO: f32 = 0.001_935_307_2;

const HALF_PI_F64: f64 = HALF_PI as f64;

/// Largest magnitude reduced in `f32`.
const REDUCTION_LIMIT: f64 = 1024.0;

/// Fold `x` into `[0, π/2]`, returning the folded angle and whether the
/// result must be negated.
#[inline]
fn reduce(x: f64) -> (f32, bool) {
    let xf = x as f32;
    let bias = if xf >= 0.0 { 0.5 } else { -0.5 };
    let n = (xf * RECIP_TWO_PI + bias) as i32 as f32;
    let mut r = (xf - n * TWO_PI_HI) - n * TWO_PI_LO;

    let mut negate = false;
    if r < 0.0 {
        r = -r;
        negate = true;
    }
    if r > PI {
        r = TWO_PI - r;
        negate = !negate;
    }
    if r > HALF_PI {
        r = PI - r;
    }
    (r, negate)
}

/// Piecewise sine.
#[inline]
pub fn sin(x: f64) -> f64 {
    if !x.is_finite() {
        return f64::NAN;
    }
    if x.abs() > REDUCTION_LIMIT {
        return reference::sin(x);
    }

    let (r, negate) = reduce(x);
    let r2 = r * r;

    let result = if r < 0.5 {
        r * (1.0 - r2 * (0.166_666_66 - r2 * (0.008_333_33 - r2 * 0.000_198_41)))
    } else if r < 1.3 {
        r * (1.0
            - r2 * (0.166_666_67
                - r2 * (0.008_333_33 - r2 * (0.000_198_41 - r2 * 0.000_002_76))))
    } else {
        r * (1.0
            - r2 * (0.166_666_67
                - r2 * (0.008_333_33
                    - r2 * (0.000_198_41 - r2 * (0.000_002_76 - r2 * 0.000_000_02)))))
    };

    let result = result as f64;
    if negate {
        -result
    } else {
        result
    }
}

/// Piecewise cosine, `sin(x + π/2)`.
#[inline]
pub fn cos(x: f64) -> f64 {
    sin(x + HALF_PI_F64)
}

/// Piecewise tangent, `sin / cos`.
#[inline]
pub fn tan(x: f64) -> f64 {
    sin(x) / cos(x)
}
