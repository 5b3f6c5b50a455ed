//! Interpolation types for curve segments

use std::fmt;
use std::str::FromStr;

use super::easing::{EaseFamily, EaseMode, Easing};
use super::kernels::Kernel;
use crate::error::SkinBoundError;

/// Prefix accepted in front of interpolation names when parsing
const LEGACY_PREFIX: &str = "INTERPOLATION_";

macro_rules! interpolation_types {
    (
        plain { $($(#[$attr:meta])* $plain:ident => $plain_name:literal),* $(,)? }
        eased { $($eased:ident => $eased_name:literal : $family:ident $mode:ident),* $(,)? }
    ) => {
        /// Interpolation applied to the segment starting at a curve point
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum Interpolation {
            $($(#[$attr])* $plain,)*
            $($eased,)*
        }

        impl Interpolation {
            /// Every interpolation type, in declaration order
            pub const ALL: &'static [Interpolation] = &[$(Self::$plain,)* $(Self::$eased,)*];

            /// Canonical upper-case name
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$plain => $plain_name,)*
                    $(Self::$eased => $eased_name,)*
                }
            }

            /// Easing remap for the easing family types, `None` otherwise
            pub const fn easing(self) -> Option<Easing> {
                match self {
                    $(Self::$eased => Some(Easing::new(EaseFamily::$family, EaseMode::$mode)),)*
                    _ => None,
                }
            }
        }
    };
}

interpolation_types! {
    plain {
        Bezier => "BEZIER",
        BSpline => "BSPLINE",
        Flat => "FLAT",
        Hermite => "HERMITE",
        #[default]
        Linear => "LINEAR",
        Smooth => "SMOOTH",
        Step => "STEP",
    }
    eased {
        QuadraticIn => "QUADRATIC_IN": Quadratic In,
        QuadraticOut => "QUADRATIC_OUT": Quadratic Out,
        QuadraticInOut => "QUADRATIC_IN_OUT": Quadratic InOut,
        QuadraticOutIn => "QUADRATIC_OUT_IN": Quadratic OutIn,
        CubicIn => "CUBIC_IN": Cubic In,
        CubicOut => "CUBIC_OUT": Cubic Out,
        CubicInOut => "CUBIC_IN_OUT": Cubic InOut,
        CubicOutIn => "CUBIC_OUT_IN": Cubic OutIn,
        QuarticIn => "QUARTIC_IN": Quartic In,
        QuarticOut => "QUARTIC_OUT": Quartic Out,
        QuarticInOut => "QUARTIC_IN_OUT": Quartic InOut,
        QuarticOutIn => "QUARTIC_OUT_IN": Quartic OutIn,
        QuinticIn => "QUINTIC_IN": Quintic In,
        QuinticOut => "QUINTIC_OUT": Quintic Out,
        QuinticInOut => "QUINTIC_IN_OUT": Quintic InOut,
        QuinticOutIn => "QUINTIC_OUT_IN": Quintic OutIn,
        SineIn => "SINE_IN": Sine In,
        SineOut => "SINE_OUT": Sine Out,
        SineInOut => "SINE_IN_OUT": Sine InOut,
        SineOutIn => "SINE_OUT_IN": Sine OutIn,
        ExponentialIn => "EXPONENTIAL_IN": Exponential In,
        ExponentialOut => "EXPONENTIAL_OUT": Exponential Out,
        ExponentialInOut => "EXPONENTIAL_IN_OUT": Exponential InOut,
        ExponentialOutIn => "EXPONENTIAL_OUT_IN": Exponential OutIn,
        CircularIn => "CIRCULAR_IN": Circular In,
        CircularOut => "CIRCULAR_OUT": Circular Out,
        CircularInOut => "CIRCULAR_IN_OUT": Circular InOut,
        CircularOutIn => "CIRCULAR_OUT_IN": Circular OutIn,
        ElasticIn => "ELASTIC_IN": Elastic In,
        ElasticOut => "ELASTIC_OUT": Elastic Out,
        ElasticInOut => "ELASTIC_IN_OUT": Elastic InOut,
        ElasticOutIn => "ELASTIC_OUT_IN": Elastic OutIn,
        OvershootIn => "OVERSHOOT_IN": Overshoot In,
        OvershootOut => "OVERSHOOT_OUT": Overshoot Out,
        OvershootInOut => "OVERSHOOT_IN_OUT": Overshoot InOut,
        OvershootOutIn => "OVERSHOOT_OUT_IN": Overshoot OutIn,
        BounceIn => "BOUNCE_IN": Bounce In,
        BounceOut => "BOUNCE_OUT": Bounce Out,
        BounceInOut => "BOUNCE_IN_OUT": Bounce InOut,
        BounceOutIn => "BOUNCE_OUT_IN": Bounce OutIn,
    }
}

impl Interpolation {
    /// Evaluation strategy used for segments of this type
    pub fn kernel(self) -> Kernel {
        match self {
            Self::Bezier => Kernel::Bezier,
            Self::BSpline => Kernel::BSpline,
            Self::Flat => Kernel::HermiteFlat,
            Self::Hermite => Kernel::Hermite,
            Self::Linear => Kernel::Linear,
            Self::Smooth => Kernel::HermiteSmooth,
            Self::Step => Kernel::Step,
            other => other.easing().map_or(Kernel::Linear, Kernel::Eased),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = SkinBoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed.strip_prefix(LEGACY_PREFIX).unwrap_or(trimmed);
        Self::ALL
            .iter()
            .copied()
            .find(|interp| interp.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| SkinBoundError::UnknownInterpolation(s.to_string()))
    }
}

#[cfg(feature = "serde-support")]
impl serde::Serialize for Interpolation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde-support")]
impl<'de> serde::Deserialize<'de> for Interpolation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
