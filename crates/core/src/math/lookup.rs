//! Table-driven strategies.
//!
//! The tables themselves are owned by [`crate::strategy::Strategies`]; the
//! functions here only read them. Anything a table cannot answer falls back
//! to [`super::reference`].

use crate::lut::Lut;

use super::{reference, HALF_PI, TWO_PI};

/// Intervals in the trig and inverse trig tables.
pub const TRIG_RESOLUTION: usize = 1024;

/// Sine over `[0, 2π]`.
pub fn build_sin_table() -> Lut {
    Lut::uniform(0.0, TWO_PI, TRIG_RESOLUTION, libm::sin)
}

/// Arcsine over `[-1, 1]`.
pub fn build_asin_table() -> Lut {
    Lut::uniform(-1.0, 1.0, TRIG_RESOLUTION, libm::asin)
}

/// Arctangent over `[-1, 1]`.
pub fn build_atan_table() -> Lut {
    Lut::uniform(-1.0, 1.0, TRIG_RESOLUTION, libm::atan)
}

/// Square-root table plus the point below which it is not trusted.
///
/// Linear interpolation of sqrt over `[a, a + step]` is off by up to
/// `step² / (32 a^1.5)`, which exceeds `step` for the intervals nearest zero.
/// Inputs below `exact_below` go to the reference square root so that
/// `|sqrt(x) - √x| <= step` holds across the whole table.
#[derive(Debug, Clone)]
pub struct SqrtTable {
    lut: Lut,
    exact_below: f64,
}

impl SqrtTable {
    pub fn new(lut: Lut) -> Self {
        let step = lut.step();
        let intervals = (1.0 / (32.0 * step.sqrt())).powf(2.0 / 3.0).ceil().max(1.0);
        // Off-grid zero when min is negative: one more interval.
        let exact_below = if lut.min() >= 0.0 {
            lut.min() + intervals * step
        } else {
            (intervals + 1.0) * step
        };
        Self { lut, exact_below }
    }

    pub fn lut(&self) -> &Lut {
        &self.lut
    }

    /// Inputs below this use the reference square root.
    pub fn exact_below(&self) -> f64 {
        self.exact_below
    }
}

/// Square root from a table.
///
/// Outside the table, and near zero where the slope of sqrt is too steep
/// for the step, the reference square root is used.
#[inline]
pub fn sqrt(table: &SqrtTable, x: f64) -> f64 {
    if x < table.exact_below {
        return reference::sqrt(x);
    }
    table.lut.lookup(x).unwrap_or_else(|| reference::sqrt(x))
}

/// Sine from a `[0, 2π]` table.
#[inline]
pub fn sin(table: &Lut, x: f64) -> f64 {
    if !x.is_finite() {
        return f64::NAN;
    }
    let mut x = x % TWO_PI;
    if x < 0.0 {
        x += TWO_PI;
    }
    table.lookup(x).unwrap_or_else(|| reference::sin(x))
}

#[inline]
pub fn cos(table: &Lut, x: f64) -> f64 {
    sin(table, x + HALF_PI)
}

#[inline]
pub fn tan(table: &Lut, x: f64) -> f64 {
    sin(table, x) / cos(table, x)
}

/// Arcsine from a `[-1, 1]` table.
///
/// NaN outside `[-1, 1]`; exactly `±π/2` at `±1`.
#[inline]
pub fn asin(table: &Lut, x: f64) -> f64 {
    if x == 1.0 {
        return HALF_PI;
    }
    if x == -1.0 {
        return -HALF_PI;
    }
    table.lookup(x).unwrap_or(f64::NAN)
}

#[inline]
pub fn acos(table: &Lut, x: f64) -> f64 {
    HALF_PI - asin(table, x)
}

/// Arctangent from a `[-1, 1]` table, using `π/2 - atan(1/x)` beyond it.
#[inline]
pub fn atan(table: &Lut, x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    let a = x.abs();
    let angle = if a > 1.0 {
        HALF_PI - table.lookup(1.0 / a).unwrap_or_else(|| reference::atan(1.0 / a))
    } else {
        table.lookup(a).unwrap_or_else(|| reference::atan(a))
    };
    angle.copysign(x)
}
