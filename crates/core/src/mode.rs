//! Operation families and their strategy modes.
//!
//! Each family except `Floor` carries one mode in the configuration. Modes
//! are closed enums; `Auto` means "not decided yet" and is replaced by a
//! concrete mode once the tuner has run.

use std::fmt;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A mathematical operation with interchangeable implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Sqrt,
    Floor,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

impl Family {
    pub const ALL: [Family; 8] = [
        Family::Sqrt,
        Family::Floor,
        Family::Sin,
        Family::Cos,
        Family::Tan,
        Family::Asin,
        Family::Acos,
        Family::Atan,
    ];

    /// Families with a selectable mode, in tuning order.
    pub const TUNABLE: [Family; 7] = [
        Family::Sqrt,
        Family::Sin,
        Family::Cos,
        Family::Tan,
        Family::Asin,
        Family::Acos,
        Family::Atan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Family::Sqrt => "sqrt",
            Family::Floor => "floor",
            Family::Sin => "sin",
            Family::Cos => "cos",
            Family::Tan => "tan",
            Family::Asin => "asin",
            Family::Acos => "acos",
            Family::Atan => "atan",
        }
    }

    pub fn is_tunable(self) -> bool {
        self != Family::Floor
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Common surface of every family's mode enum.
pub trait Mode: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// The "not decided yet" sentinel.
    const AUTO: Self;

    /// Concrete mode used when a family is still `AUTO` at call time.
    const FALLBACK: Self;

    /// All concrete modes, in tie-breaking order.
    fn concrete() -> &'static [Self];

    /// Stable name, the same spelling used in configuration files.
    fn name(self) -> &'static str;

    /// Compact tag for atomic storage.
    fn to_tag(self) -> u8;

    fn from_tag(tag: u8) -> Option<Self>;

    fn is_auto(self) -> bool {
        self == Self::AUTO
    }

    /// `FALLBACK` for `AUTO`, otherwise `self`.
    fn resolved(self) -> Self {
        if self.is_auto() {
            Self::FALLBACK
        } else {
            self
        }
    }
}

/// Generates the enum plus its `Mode` impl from one variant table so the
/// tag, name and concrete order can never disagree.
macro_rules! mode_enum {
    (
        $(#[$meta:meta])*
        $name:ident, fallback = $fallback:ident,
        { $( $(#[$vmeta:meta])* $variant:ident = $tag:literal => $label:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            #[default]
            Auto,
            $( $(#[$vmeta])* $variant, )+
        }

        impl Mode for $name {
            const AUTO: Self = $name::Auto;
            const FALLBACK: Self = $name::$fallback;

            fn concrete() -> &'static [Self] {
                &[ $( $name::$variant ),+ ]
            }

            fn name(self) -> &'static str {
                match self {
                    $name::Auto => "AUTO",
                    $( $name::$variant => $label, )+
                }
            }

            fn to_tag(self) -> u8 {
                match self {
                    $name::Auto => 0,
                    $( $name::$variant => $tag, )+
                }
            }

            fn from_tag(tag: u8) -> Option<Self> {
                match tag {
                    0 => Some($name::Auto),
                    $( $tag => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.name())
            }
        }
    };
}

mode_enum! {
    /// Square root strategies.
    SqrtMode, fallback = Lut,
    {
        /// Interpolated table over the configured domain.
        Lut = 1 => "LUT",
        /// `1 / fast_inv_sqrt(x)`.
        InvSqrt = 2 => "INV_SQRT",
        Reference = 3 => "REFERENCE",
    }
}

mode_enum! {
    /// Sine / cosine / tangent strategies.
    TrigMode, fallback = Taylor,
    {
        /// f32 range reduction, three polynomial branches.
        Piecewise = 1 => "PIECEWISE",
        /// Order 16/17 Taylor series in f64.
        Taylor = 2 => "TAYLOR",
        /// Seventh-order polynomial.
        Poly = 3 => "POLY",
        /// 1024-interval sine table.
        Lut = 4 => "LUT",
        Reference = 5 => "REFERENCE",
    }
}

mode_enum! {
    /// Arcsine / arccosine / arctangent strategies.
    ArcMode, fallback = Reference,
    {
        /// Minimax polynomials.
        Poly = 1 => "POLY",
        /// 1024-interval tables over `[-1, 1]`.
        Lut = 2 => "LUT",
        Reference = 3 => "REFERENCE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_round_trip<M: Mode>() {
        assert_eq!(M::from_tag(M::AUTO.to_tag()), Some(M::AUTO));
        for &mode in M::concrete() {
            assert!(!mode.is_auto());
            assert_eq!(M::from_tag(mode.to_tag()), Some(mode));
        }
        assert_eq!(M::from_tag(200), None);
    }

    #[test]
    fn every_mode_has_a_unique_tag() {
        tags_round_trip::<SqrtMode>();
        tags_round_trip::<TrigMode>();
        tags_round_trip::<ArcMode>();
    }

    #[test]
    fn auto_resolves_to_fallback() {
        assert_eq!(SqrtMode::Auto.resolved(), SqrtMode::Lut);
        assert_eq!(TrigMode::Auto.resolved(), TrigMode::Taylor);
        assert_eq!(ArcMode::Auto.resolved(), ArcMode::Reference);
        assert_eq!(TrigMode::Lut.resolved(), TrigMode::Lut);
    }

    #[test]
    fn concrete_excludes_auto() {
        assert_eq!(SqrtMode::concrete().len(), 3);
        assert_eq!(TrigMode::concrete().len(), 5);
        assert_eq!(ArcMode::concrete().len(), 3);
        assert!(!TrigMode::concrete().contains(&TrigMode::Auto));
    }

    #[test]
    fn names_match_serialized_form() {
        assert_eq!(SqrtMode::InvSqrt.name(), "INV_SQRT");
        assert_eq!(TrigMode::Piecewise.to_string(), "PIECEWISE");
        assert_eq!(ArcMode::Auto.name(), "AUTO");
    }

    #[test]
    fn floor_is_not_tunable() {
        assert!(!Family::Floor.is_tunable());
        assert!(!Family::TUNABLE.contains(&Family::Floor));
        assert_eq!(Family::ALL.len(), Family::TUNABLE.len() + 1);
    }
}
