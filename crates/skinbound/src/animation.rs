//! Animation channels targeting scene nodes

use std::fmt;

use crate::curve::{Interpolation, SrtCurve};
use crate::error::{Result, SkinBoundError};
use crate::math::{SRT_COMPONENTS, Srt};

/// Transform attribute animated by a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TargetAttribute {
    ScaleUnit,
    Scale,
    ScaleX,
    ScaleY,
    ScaleZ,
    Rotate,
    Translate,
    TranslateX,
    TranslateY,
    TranslateZ,
    RotateTranslate,
    ScaleRotateTranslate,
    ScaleTranslate,
    ScaleRotate,
}

impl TargetAttribute {
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(Self::ScaleUnit),
            1 => Ok(Self::Scale),
            2 => Ok(Self::ScaleX),
            3 => Ok(Self::ScaleY),
            4 => Ok(Self::ScaleZ),
            8 => Ok(Self::Rotate),
            9 => Ok(Self::Translate),
            10 => Ok(Self::TranslateX),
            11 => Ok(Self::TranslateY),
            12 => Ok(Self::TranslateZ),
            16 => Ok(Self::RotateTranslate),
            17 => Ok(Self::ScaleRotateTranslate),
            18 => Ok(Self::ScaleTranslate),
            19 => Ok(Self::ScaleRotate),
            _ => Err(SkinBoundError::UnknownTargetAttribute(raw)),
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            Self::ScaleUnit => 0,
            Self::Scale => 1,
            Self::ScaleX => 2,
            Self::ScaleY => 3,
            Self::ScaleZ => 4,
            Self::Rotate => 8,
            Self::Translate => 9,
            Self::TranslateX => 10,
            Self::TranslateY => 11,
            Self::TranslateZ => 12,
            Self::RotateTranslate => 16,
            Self::ScaleRotateTranslate => 17,
            Self::ScaleTranslate => 18,
            Self::ScaleRotate => 19,
        }
    }

    /// Number of floats per key value
    pub fn component_count(self) -> usize {
        match self {
            Self::ScaleUnit
            | Self::ScaleX
            | Self::ScaleY
            | Self::ScaleZ
            | Self::TranslateX
            | Self::TranslateY
            | Self::TranslateZ => 1,
            Self::Scale | Self::Translate => 3,
            Self::Rotate => 4,
            Self::ScaleTranslate => 6,
            Self::RotateTranslate | Self::ScaleRotate => 7,
            Self::ScaleRotateTranslate => SRT_COMPONENTS,
        }
    }
}

/// Why a channel produced no curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveSkip {
    /// Only scale/rotate/translate channels are turned into curves
    Unsupported(TargetAttribute),
    NoKeys,
    /// First and last key share a time, so times cannot be normalized
    ZeroDuration,
    /// Key times go backwards
    UnsortedKeyTimes,
    /// Key value count does not match `key_count * component_count`
    ValueCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for CurveSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(attribute) => write!(f, "unsupported target attribute {attribute:?}"),
            Self::NoKeys => write!(f, "no keys"),
            Self::ZeroDuration => write!(f, "zero duration"),
            Self::UnsortedKeyTimes => write!(f, "key times are not sorted"),
            Self::ValueCountMismatch { expected, actual } => {
                write!(f, "expected {expected} key values, found {actual}")
            }
        }
    }
}

/// Keyframes for one attribute of one node
///
/// `key_values`, `in_tangents` and `out_tangents` are flattened with
/// `target_attribute.component_count()` floats per key. Per-key
/// interpolations and tangents are optional; missing entries mean linear
/// interpolation and zero tangents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationChannel {
    pub target_id: String,
    pub target_attribute: TargetAttribute,
    pub key_times: Vec<f32>,
    pub key_values: Vec<f32>,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub interpolations: Vec<Interpolation>,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub in_tangents: Vec<f32>,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub out_tangents: Vec<f32>,
}

impl AnimationChannel {
    pub fn new(
        target_id: impl Into<String>,
        target_attribute: TargetAttribute,
        key_times: Vec<f32>,
        key_values: Vec<f32>,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            target_attribute,
            key_times,
            key_values,
            interpolations: Vec::new(),
            in_tangents: Vec::new(),
            out_tangents: Vec::new(),
        }
    }

    /// Scale/rotate/translate channel from typed keys
    pub fn srt(target_id: impl Into<String>, keys: &[(f32, Srt)]) -> Self {
        let key_times = keys.iter().map(|(t, _)| *t).collect();
        let key_values = keys.iter().flat_map(|(_, srt)| srt.to_components()).collect();
        Self::new(
            target_id,
            TargetAttribute::ScaleRotateTranslate,
            key_times,
            key_values,
        )
    }

    pub fn key_count(&self) -> usize {
        self.key_times.len()
    }

    pub fn start_time(&self) -> f32 {
        self.key_times.first().copied().unwrap_or(0.0)
    }

    /// Time between the first and last key, in the channel's own units
    pub fn duration(&self) -> f32 {
        match (self.key_times.first(), self.key_times.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Build the normalized-time SRT curve for this channel
    pub fn srt_curve(&self) -> std::result::Result<SrtCurve, CurveSkip> {
        if self.target_attribute != TargetAttribute::ScaleRotateTranslate {
            return Err(CurveSkip::Unsupported(self.target_attribute));
        }

        let key_count = self.key_count();
        if key_count == 0 {
            return Err(CurveSkip::NoKeys);
        }
        let expected = key_count * SRT_COMPONENTS;
        if self.key_values.len() != expected {
            return Err(CurveSkip::ValueCountMismatch {
                expected,
                actual: self.key_values.len(),
            });
        }
        if self.key_times.windows(2).any(|w| w[1] < w[0]) {
            return Err(CurveSkip::UnsortedKeyTimes);
        }
        let duration = self.duration();
        if duration <= 0.0 {
            return Err(CurveSkip::ZeroDuration);
        }

        let start = self.start_time();
        let has_tangents =
            self.in_tangents.len() == expected && self.out_tangents.len() == expected;

        let mut curve = SrtCurve::new(key_count);
        for (index, chunk) in self.key_values.chunks_exact(SRT_COMPONENTS).enumerate() {
            let mut components = [0.0; SRT_COMPONENTS];
            components.copy_from_slice(chunk);
            let srt = Srt::from_components(&components);
            let time = (self.key_times[index] - start) / duration;
            let interpolation = self
                .interpolations
                .get(index)
                .copied()
                .unwrap_or_default();

            if has_tangents {
                let range = index * SRT_COMPONENTS..(index + 1) * SRT_COMPONENTS;
                curve.set_key_with_tangents(
                    index,
                    time,
                    &srt,
                    interpolation,
                    &self.in_tangents[range.clone()],
                    &self.out_tangents[range],
                );
            } else {
                curve.set_key(index, time, &srt, interpolation);
            }
        }

        Ok(curve)
    }
}

/// A named group of channels
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Animation {
    pub id: String,
    pub channels: Vec<AnimationChannel>,
}

impl Animation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            channels: Vec::new(),
        }
    }

    pub fn add_channel(&mut self, channel: AnimationChannel) {
        self.channels.push(channel);
    }
}

/// Every animation available to a bounds computation
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(transparent))]
pub struct Animations {
    animations: Vec<Animation>,
}

impl Animations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Animation> {
        self.animations.iter()
    }

    /// All channels across all animations
    pub fn channels(&self) -> impl Iterator<Item = &AnimationChannel> {
        self.animations.iter().flat_map(|a| a.channels.iter())
    }

    /// Channels whose target is `target_id`
    pub fn channels_targeting<'a>(
        &'a self,
        target_id: &'a str,
    ) -> impl Iterator<Item = &'a AnimationChannel> + 'a {
        self.channels().filter(move |c| c.target_id == target_id)
    }
}

impl From<Vec<Animation>> for Animations {
    fn from(animations: Vec<Animation>) -> Self {
        Self { animations }
    }
}

impl FromIterator<Animation> for Animations {
    fn from_iter<I: IntoIterator<Item = Animation>>(iter: I) -> Self {
        Self {
            animations: iter.into_iter().collect(),
        }
    }
}
