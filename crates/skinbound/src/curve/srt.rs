//! Typed scale/rotate/translate curves

use super::{Curve, Interpolation};
use crate::math::{SRT_COMPONENTS, SRT_ROTATION_OFFSET, Srt};

/// A [`Curve`] whose points are [`Srt`] transforms
///
/// Internally this is a 10-component curve with the rotation quaternion at
/// offset 3, so the rotation is always slerped.
#[derive(Debug, Clone, PartialEq)]
pub struct SrtCurve {
    curve: Curve,
}

impl SrtCurve {
    /// Create an SRT curve with `key_count` identity keys
    pub fn new(key_count: usize) -> Self {
        let mut curve = Curve::new(key_count, SRT_COMPONENTS);
        curve.quaternion_offset = Some(SRT_ROTATION_OFFSET);
        let identity = Srt::IDENTITY.to_components();
        for point in &mut curve.points {
            point.value.copy_from_slice(&identity);
        }
        Self { curve }
    }

    /// Set key `index` to `srt` at normalized `time`
    pub fn set_key(&mut self, index: usize, time: f32, srt: &Srt, interpolation: Interpolation) {
        self.curve
            .set_point(index, time, &srt.to_components(), interpolation);
    }

    /// Set key `index` including flattened 10-component tangents
    pub fn set_key_with_tangents(
        &mut self,
        index: usize,
        time: f32,
        srt: &Srt,
        interpolation: Interpolation,
        in_tangent: &[f32],
        out_tangent: &[f32],
    ) {
        self.curve.set_point_with_tangents(
            index,
            time,
            &srt.to_components(),
            interpolation,
            in_tangent,
            out_tangent,
        );
    }

    /// Evaluate at normalized `time`
    pub fn evaluate(&self, time: f32) -> Srt {
        let mut components = [0.0; SRT_COMPONENTS];
        self.curve.evaluate(time, &mut components);
        Srt::from_components(&components)
    }

    pub fn key_count(&self) -> usize {
        self.curve.point_count()
    }

    /// Underlying flat curve
    pub fn curve(&self) -> &Curve {
        &self.curve
    }
}
