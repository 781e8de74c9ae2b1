//! Strategy configuration.
//!
//! One mode per family plus the shape of the square-root lookup table.
//! The host loads it at startup, the tuner may replace `AUTO` entries, and
//! it is persisted through a [`ConfigStore`]. Nothing writes to it during
//! steady-state dispatch.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::mode::{ArcMode, Family, Mode, SqrtMode, TrigMode};

/// Domain and step of the square-root lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[serde(default)]
pub struct SqrtLutConfig {
    /// Smallest tabulated input.
    pub min: f64,

    /// Largest tabulated input.
    pub max: f64,

    /// Distance between samples. Also the interpolation error bound.
    pub step: f64,
}

impl Default for SqrtLutConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 256.0,
            step: 0.001,
        }
    }
}

/// Active strategy per family.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Encode, Decode)]
#[serde(default)]
pub struct Configuration {
    // ========================================================================
    // Square root
    // ========================================================================
    pub sqrt: SqrtMode,

    /// Lookup-table shape for `SqrtMode::Lut`.
    pub sqrt_lut: SqrtLutConfig,

    // ========================================================================
    // Trigonometry
    // ========================================================================
    pub sin: TrigMode,
    pub cos: TrigMode,
    pub tan: TrigMode,

    // ========================================================================
    // Inverse trigonometry
    // ========================================================================
    pub asin: ArcMode,
    pub acos: ArcMode,
    pub atan: ArcMode,
}

impl Configuration {
    /// Reference accuracy everywhere, nothing to tune.
    pub fn accurate() -> Self {
        Self {
            sqrt: SqrtMode::Reference,
            sin: TrigMode::Reference,
            cos: TrigMode::Reference,
            tan: TrigMode::Reference,
            asin: ArcMode::Reference,
            acos: ArcMode::Reference,
            atan: ArcMode::Reference,
            ..Default::default()
        }
    }

    /// The usual winners on desktop x86-64, for hosts that skip tuning.
    pub fn fastest_guess() -> Self {
        Self {
            sqrt: SqrtMode::InvSqrt,
            sin: TrigMode::Piecewise,
            cos: TrigMode::Piecewise,
            tan: TrigMode::Piecewise,
            asin: ArcMode::Poly,
            acos: ArcMode::Poly,
            atan: ArcMode::Poly,
            ..Default::default()
        }
    }

    /// Mode name for a family, `None` for `Floor`.
    pub fn mode_name(&self, family: Family) -> Option<&'static str> {
        let name = match family {
            Family::Sqrt => self.sqrt.name(),
            Family::Floor => return None,
            Family::Sin => self.sin.name(),
            Family::Cos => self.cos.name(),
            Family::Tan => self.tan.name(),
            Family::Asin => self.asin.name(),
            Family::Acos => self.acos.name(),
            Family::Atan => self.atan.name(),
        };
        Some(name)
    }

    /// Whether any family still waits for tuning.
    pub fn needs_tuning(&self) -> bool {
        self.sqrt.is_auto()
            || self.sin.is_auto()
            || self.cos.is_auto()
            || self.tan.is_auto()
            || self.asin.is_auto()
            || self.acos.is_auto()
            || self.atan.is_auto()
    }
}

/// Durable storage for a [`Configuration`].
///
/// Format and location belong to the implementor.
pub trait ConfigStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn load(&self) -> Result<Configuration, Self::Error>;

    fn save(&self, config: &Configuration) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Configuration::default();
        assert!(config.needs_tuning());
        assert_eq!(config.sqrt, SqrtMode::Auto);
        assert_eq!(config.sqrt_lut.max, 256.0);
        assert_eq!(config.sqrt_lut.step, 0.001);
    }

    #[test]
    fn test_presets_are_locked() {
        assert!(!Configuration::accurate().needs_tuning());
        assert!(!Configuration::fastest_guess().needs_tuning());
        assert_eq!(Configuration::accurate().sqrt_lut, SqrtLutConfig::default());
    }

    #[test]
    fn test_mode_names() {
        let config = Configuration::fastest_guess();
        assert_eq!(config.mode_name(Family::Sqrt), Some("INV_SQRT"));
        assert_eq!(config.mode_name(Family::Atan), Some("POLY"));
        assert_eq!(config.mode_name(Family::Floor), None);
    }

    #[test]
    fn test_single_auto_family_needs_tuning() {
        let config = Configuration {
            acos: ArcMode::Auto,
            ..Configuration::accurate()
        };
        assert!(config.needs_tuning());
    }
}
