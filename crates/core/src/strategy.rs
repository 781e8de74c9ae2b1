//! Strategy table: the single place where a mode becomes a function call.
//!
//! `Strategies` owns every lookup table. Each family has one method taking
//! an explicit mode and matching on it exhaustively; the dispatcher and the
//! tuner both go through here. Adding a strategy means adding a variant and
//! one arm.

use tracing::warn;

use crate::config::SqrtLutConfig;
use crate::lut::Lut;
use crate::math::lookup::SqrtTable;
use crate::math::{lookup, piecewise, poly, reference, sqrt, taylor};
use crate::mode::{ArcMode, Mode, SqrtMode, TrigMode};

/// Immutable tables backing the `Lut` strategies.
#[derive(Debug, Clone)]
pub struct Strategies {
    sqrt_table: SqrtTable,
    sin_table: Lut,
    asin_table: Lut,
    atan_table: Lut,
}

impl Strategies {
    /// Build every table once.
    ///
    /// A degenerate square-root table shape is logged and replaced by the
    /// default shape.
    pub fn build(sqrt_lut: &SqrtLutConfig) -> Self {
        let sqrt_table = SqrtTable::new(build_sqrt_table(sqrt_lut));

        Self {
            sqrt_table,
            sin_table: lookup::build_sin_table(),
            asin_table: lookup::build_asin_table(),
            atan_table: lookup::build_atan_table(),
        }
    }

    pub fn sqrt_table(&self) -> &Lut {
        self.sqrt_table.lut()
    }

    #[inline]
    pub fn sqrt(&self, mode: SqrtMode, x: f64) -> f64 {
        match mode.resolved() {
            SqrtMode::Lut => lookup::sqrt(&self.sqrt_table, x),
            SqrtMode::InvSqrt => sqrt::inv_sqrt_sqrt(x),
            SqrtMode::Reference | SqrtMode::Auto => reference::sqrt(x),
        }
    }

    #[inline]
    pub fn sin(&self, mode: TrigMode, x: f64) -> f64 {
        match mode.resolved() {
            TrigMode::Piecewise => piecewise::sin(x),
            TrigMode::Taylor => taylor::sin(x),
            TrigMode::Poly => poly::sin(x),
            TrigMode::Lut => lookup::sin(&self.sin_table, x),
            TrigMode::Reference | TrigMode::Auto => reference::sin(x),
        }
    }

    #[inline]
    pub fn cos(&self, mode: TrigMode, x: f64) -> f64 {
        match mode.resolved() {
            TrigMode::Piecewise => piecewise::cos(x),
            TrigMode::Taylor => taylor::cos(x),
            TrigMode::Poly => poly::cos(x),
            TrigMode::Lut => lookup::cos(&self.sin_table, x),
            TrigMode::Reference | TrigMode::Auto => reference::cos(x),
        }
    }

    #[inline]
    pub fn tan(&self, mode: TrigMode, x: f64) -> f64 {
        match mode.resolved() {
            TrigMode::Piecewise => piecewise::tan(x),
            TrigMode::Taylor => taylor::tan(x),
            TrigMode::Poly => poly::tan(x),
            TrigMode::Lut => lookup::tan(&self.sin_table, x),
            TrigMode::Reference | TrigMode::Auto => reference::tan(x),
        }
    }

    #[inline]
    pub fn asin(&self, mode: ArcMode, x: f64) -> f64 {
        match mode.resolved() {
            ArcMode::Poly => poly::asin(x),
            ArcMode::Lut => lookup::asin(&self.asin_table, x),
            ArcMode::Reference | ArcMode::Auto => reference::asin(x),
        }
    }

    #[inline]
    pub fn acos(&self, mode: ArcMode, x: f64) -> f64 {
        match mode.resolved() {
            ArcMode::Poly => poly::acos(x),
            ArcMode::Lut => lookup::acos(&self.asin_table, x),
            ArcMode::Reference | ArcMode::Auto => reference::acos(x),
        }
    }

    #[inline]
    pub fn atan(&self, mode: ArcMode, x: f64) -> f64 {
        match mode.resolved() {
            ArcMode::Poly => poly::atan(x),
            ArcMode::Lut => lookup::atan(&self.atan_table, x),
            ArcMode::Reference | ArcMode::Auto => reference::atan(x),
        }
    }
}

fn build_sqrt_table(shape: &SqrtLutConfig) -> Lut {
    if let Some(table) = Lut::build(shape.min, shape.max, shape.step, reference::sqrt) {
        return table;
    }

    let fallback = SqrtLutConfig::default();
    warn!(
        min = shape.min,
        max = shape.max,
        step = shape.step,
        "invalid sqrt table shape, using default {:?}",
        fallback
    );
    let intervals = ((fallback.max - fallback.min) / fallback.step).round() as usize;
    Lut::uniform(fallback.min, fallback.max, intervals, reference::sqrt)
}
