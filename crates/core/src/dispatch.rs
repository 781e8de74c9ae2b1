//! Operation dispatcher.
//!
//! `FastMath` is what call sites hold. It reads the active mode for a family
//! and hands the argument to the strategy table. Modes sit in `AtomicU8`
//! cells so a host can `apply` a new configuration through a shared
//! reference while other code keeps calling.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::config::{Configuration, SqrtLutConfig};
use crate::math;
use crate::mode::{ArcMode, Mode, SqrtMode, TrigMode};
use crate::strategy::Strategies;

/// One family's active mode.
#[derive(Debug)]
struct ModeCell(AtomicU8);

impl ModeCell {
    fn new<M: Mode>(mode: M) -> Self {
        Self(AtomicU8::new(mode.to_tag()))
    }

    #[inline]
    fn get<M: Mode>(&self) -> M {
        // Only `set` writes here, with a valid tag for the same `M`.
        M::from_tag(self.0.load(Ordering::Relaxed)).unwrap_or(M::FALLBACK)
    }

    fn set<M: Mode>(&self, mode: M) {
        self.0.store(mode.to_tag(), Ordering::Relaxed);
    }
}

/// Runtime-selectable fast math.
#[derive(Debug)]
pub struct FastMath {
    strategies: Strategies,
    sqrt: ModeCell,
    sin: ModeCell,
    cos: ModeCell,
    tan: ModeCell,
    asin: ModeCell,
    acos: ModeCell,
    atan: ModeCell,
}

impl FastMath {
    /// Build the tables for `config` and start with its modes.
    pub fn new(config: &Configuration) -> Self {
        Self::with_strategies(Strategies::build(&config.sqrt_lut), config)
    }

    /// Reuse tables that were already built, e.g. by the tuner.
    pub fn with_strategies(strategies: Strategies, config: &Configuration) -> Self {
        Self {
            strategies,
            sqrt: ModeCell::new(config.sqrt),
            sin: ModeCell::new(config.sin),
            cos: ModeCell::new(config.cos),
            tan: ModeCell::new(config.tan),
            asin: ModeCell::new(config.asin),
            acos: ModeCell::new(config.acos),
            atan: ModeCell::new(config.atan),
        }
    }

    /// Switch every family to the modes in `config`.
    ///
    /// Each family switches on its own; a concurrent caller sees either the
    /// old or the new mode per family. The square-root table shape is fixed
    /// at construction and is not rebuilt here.
    pub fn apply(&self, config: &Configuration) {
        self.sqrt.set(config.sqrt);
        self.sin.set(config.sin);
        self.cos.set(config.cos);
        self.tan.set(config.tan);
        self.asin.set(config.asin);
        self.acos.set(config.acos);
        self.atan.set(config.atan);
    }

    /// Current modes as a configuration value.
    pub fn modes(&self) -> Configuration {
        Configuration {
            sqrt: self.sqrt.get(),
            sqrt_lut: sqrt_shape(&self.strategies),
            sin: self.sin.get(),
            cos: self.cos.get(),
            tan: self.tan.get(),
            asin: self.asin.get(),
            acos: self.acos.get(),
            atan: self.atan.get(),
        }
    }

    pub fn strategies(&self) -> &Strategies {
        &self.strategies
    }

    #[inline]
    pub fn sqrt(&self, x: f64) -> f64 {
        self.strategies.sqrt(self.sqrt.get::<SqrtMode>(), x)
    }

    #[inline]
    pub fn floor(&self, x: f64) -> f64 {
        math::floor(x)
    }

    #[inline]
    pub fn sin(&self, x: f64) -> f64 {
        self.strategies.sin(self.sin.get::<TrigMode>(), x)
    }

    #[inline]
    pub fn cos(&self, x: f64) -> f64 {
        self.strategies.cos(self.cos.get::<TrigMode>(), x)
    }

    #[inline]
    pub fn tan(&self, x: f64) -> f64 {
        self.strategies.tan(self.tan.get::<TrigMode>(), x)
    }

    #[inline]
    pub fn asin(&self, x: f64) -> f64 {
        self.strategies.asin(self.asin.get::<ArcMode>(), x)
    }

    #[inline]
    pub fn acos(&self, x: f64) -> f64 {
        self.strategies.acos(self.acos.get::<ArcMode>(), x)
    }

    #[inline]
    pub fn atan(&self, x: f64) -> f64 {
        self.strategies.atan(self.atan.get::<ArcMode>(), x)
    }
}

impl Default for FastMath {
    fn default() -> Self {
        Self::new(&Configuration::default())
    }
}

fn sqrt_shape(strategies: &Strategies) -> SqrtLutConfig {
    let table = strategies.sqrt_table();
    SqrtLutConfig {
        min: table.min(),
        max: table.max(),
        step: table.step(),
    }
}
