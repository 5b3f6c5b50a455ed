//! Multi-component animation curves over normalized time
//!
//! A [`Curve`] holds a fixed number of points, each with `component_count`
//! values, incoming and outgoing tangents, and the interpolation used for the
//! segment that starts at it. Point times live in `[0, 1]`, the first point
//! at 0 and the last at 1.
//!
//! An optional quaternion sub-range (4 components starting at
//! `quaternion_offset`) is always interpolated spherically, using the same
//! segment parameter as the scalar components.

mod easing;
mod interpolation;
mod kernels;
mod srt;

pub use easing::{EaseFamily, EaseMode, Easing};
pub use interpolation::Interpolation;
pub use kernels::{Kernel, Segment, bezier, bspline, hermite, lerp, slerp};
pub use srt::SrtCurve;

use crate::error::{Result, SkinBoundError};

/// A single curve point
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Normalized time in `[0, 1]`
    pub time: f32,
    pub value: Vec<f32>,
    /// Tangent approaching this point
    pub in_value: Vec<f32>,
    /// Tangent leaving this point
    pub out_value: Vec<f32>,
    /// Interpolation for the segment starting at this point
    pub interpolation: Interpolation,
}

impl Point {
    fn zeroed(time: f32, component_count: usize) -> Self {
        Self {
            time,
            value: vec![0.0; component_count],
            in_value: vec![0.0; component_count],
            out_value: vec![0.0; component_count],
            interpolation: Interpolation::Linear,
        }
    }
}

/// N-component keyframe curve
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(try_from = "CurveData"))]
pub struct Curve {
    points: Vec<Point>,
    component_count: usize,
    quaternion_offset: Option<usize>,
}

/// Unchecked serialized form of a [`Curve`]
#[cfg(feature = "serde-support")]
#[derive(serde::Deserialize)]
struct CurveData {
    points: Vec<Point>,
    component_count: usize,
    quaternion_offset: Option<usize>,
}

#[cfg(feature = "serde-support")]
impl TryFrom<CurveData> for Curve {
    type Error = SkinBoundError;

    fn try_from(data: CurveData) -> Result<Self> {
        Self::from_points(data.points, data.component_count, data.quaternion_offset)
    }
}

impl Curve {
    /// Build a curve from existing points, checking their layout
    ///
    /// Every point must carry `component_count` values and tangents, and the
    /// quaternion range must fit inside the components.
    pub fn from_points(
        points: Vec<Point>,
        component_count: usize,
        quaternion_offset: Option<usize>,
    ) -> Result<Self> {
        if points.is_empty() || component_count == 0 {
            return Err(SkinBoundError::EmptyCurve);
        }
        for (index, point) in points.iter().enumerate() {
            let actual = [point.value.len(), point.in_value.len(), point.out_value.len()]
                .into_iter()
                .find(|len| *len != component_count);
            if let Some(actual) = actual {
                return Err(SkinBoundError::PointComponentMismatch {
                    index,
                    expected: component_count,
                    actual,
                });
            }
        }

        let mut curve = Self {
            points,
            component_count,
            quaternion_offset: None,
        };
        if let Some(offset) = quaternion_offset {
            curve.set_quaternion_offset(offset)?;
        }
        Ok(curve)
    }

    /// Create a curve with zeroed points
    ///
    /// Every point starts at time 0 with linear interpolation, except the
    /// last point which sits at time 1.
    ///
    /// # Panics
    ///
    /// Panics if `point_count` or `component_count` is zero.
    pub fn new(point_count: usize, component_count: usize) -> Self {
        assert!(point_count > 0, "curve needs at least one point");
        assert!(component_count > 0, "curve needs at least one component");

        let mut points: Vec<Point> = (0..point_count)
            .map(|_| Point::zeroed(0.0, component_count))
            .collect();
        if let Some(last) = points.last_mut() {
            last.time = 1.0;
        }

        Self {
            points,
            component_count,
            quaternion_offset: None,
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn component_count(&self) -> usize {
        self.component_count
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, index: usize) -> &Point {
        &self.points[index]
    }

    pub fn start_time(&self) -> f32 {
        self.points[0].time
    }

    pub fn end_time(&self) -> f32 {
        self.points[self.points.len() - 1].time
    }

    pub fn quaternion_offset(&self) -> Option<usize> {
        self.quaternion_offset
    }

    /// Mark components `offset..offset + 4` as a quaternion
    pub fn set_quaternion_offset(&mut self, offset: usize) -> Result<()> {
        if offset + 4 > self.component_count {
            return Err(SkinBoundError::InvalidQuaternionOffset {
                offset,
                component_count: self.component_count,
            });
        }
        self.quaternion_offset = Some(offset);
        Ok(())
    }

    /// Set a point's time, value and interpolation, leaving its tangents alone
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or `value` is shorter than the
    /// component count.
    pub fn set_point(&mut self, index: usize, time: f32, value: &[f32], interpolation: Interpolation) {
        self.check_point_time(index, time);
        let n = self.component_count;
        let point = &mut self.points[index];
        point.time = time;
        point.interpolation = interpolation;
        point.value.copy_from_slice(&value[..n]);
    }

    /// Set a point including its tangents
    pub fn set_point_with_tangents(
        &mut self,
        index: usize,
        time: f32,
        value: &[f32],
        interpolation: Interpolation,
        in_value: &[f32],
        out_value: &[f32],
    ) {
        self.set_point(index, time, value, interpolation);
        self.set_tangent(index, interpolation, in_value, out_value);
    }

    /// Set a point's interpolation and tangents
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or a tangent slice is shorter than
    /// the component count.
    pub fn set_tangent(
        &mut self,
        index: usize,
        interpolation: Interpolation,
        in_value: &[f32],
        out_value: &[f32],
    ) {
        let n = self.component_count;
        let point = &mut self.points[index];
        point.interpolation = interpolation;
        point.in_value.copy_from_slice(&in_value[..n]);
        point.out_value.copy_from_slice(&out_value[..n]);
    }

    fn check_point_time(&self, index: usize, time: f32) {
        let count = self.points.len();
        assert!(index < count, "point index {index} out of range for {count} points");
        debug_assert!((0.0..=1.0).contains(&time), "point time {time} outside [0, 1]");
        debug_assert!(
            count == 1 || index != 0 || time == 0.0,
            "first point must sit at time 0"
        );
        debug_assert!(
            count == 1 || index != count - 1 || time == 1.0,
            "last point must sit at time 1"
        );
    }

    /// Evaluate the curve at normalized `time`
    ///
    /// Times outside `[0, 1]` are clamped to the end points. `dst` must hold
    /// at least `component_count` values.
    pub fn evaluate(&self, time: f32, dst: &mut [f32]) {
        self.evaluate_range(time, 0.0, 1.0, 0.0, dst);
    }

    /// Evaluate into a freshly allocated vector
    pub fn sample(&self, time: f32) -> Vec<f32> {
        let mut dst = vec![0.0; self.component_count];
        self.evaluate(time, &mut dst);
        dst
    }

    /// Evaluate the part of the curve between `start` and `end`
    ///
    /// `time` is mapped from `[0, 1]` onto the points bracketing the range.
    /// With a positive `loop_blend_time`, times past the end blend from the
    /// last point of the range back to the first (and the reverse before
    /// the start) over that duration. Otherwise times are clamped.
    pub fn evaluate_range(
        &self,
        time: f32,
        start: f32,
        end: f32,
        loop_blend_time: f32,
        dst: &mut [f32],
    ) {
        debug_assert!(0.0 <= start && start <= end && end <= 1.0);
        debug_assert!(loop_blend_time >= 0.0);

        let n = self.component_count;
        let dst = &mut dst[..n];
        let points = &self.points;

        if points.len() == 1 {
            dst.copy_from_slice(&points[0].value);
            return;
        }

        let mut min = 0;
        let mut max = points.len() - 1;
        let mut local_time = time;
        if start > 0.0 || end < 1.0 {
            min = self.determine_index_between(start, 0, max);
            max = self.determine_index_between(end, min, max);
            local_time = points[min].time + (points[max].time - points[min].time) * time;
        }

        if loop_blend_time == 0.0 {
            if local_time < points[min].time {
                local_time = points[min].time;
            } else if local_time > points[max].time {
                local_time = points[max].time;
            }
        }

        // Exact end points return the stored value untouched
        if local_time == points[min].time {
            dst.copy_from_slice(&points[min].value);
            return;
        }
        if local_time == points[max].time {
            dst.copy_from_slice(&points[max].value);
            return;
        }

        if local_time > points[max].time {
            let segment = Segment {
                prev: None,
                from: &points[max],
                to: &points[min],
                next: None,
            };
            let s = (local_time - points[max].time) / loop_blend_time;
            self.interpolate(s, &segment, dst);
        } else if local_time < points[min].time {
            let segment = Segment {
                prev: None,
                from: &points[min],
                to: &points[max],
                next: None,
            };
            let s = (points[min].time - local_time) / loop_blend_time;
            self.interpolate(s, &segment, dst);
        } else {
            let index = self.determine_index_between(local_time, min, max);
            let segment = self.segment(index);
            let span = segment.to.time - segment.from.time;
            let s = if span > 0.0 {
                (local_time - segment.from.time) / span
            } else {
                0.0
            };
            self.interpolate(s, &segment, dst);
        }
    }

    /// Index of the segment containing `time`
    ///
    /// Returns `i` with `points[i].time <= time < points[i + 1].time`; the
    /// last segment also contains the final point.
    pub fn determine_index(&self, time: f32) -> usize {
        let last = self.points.len() - 1;
        self.determine_index_between(time, 0, last).min(last.saturating_sub(1))
    }

    /// Binary search for the segment containing `time` within `min..=max`
    fn determine_index_between(&self, time: f32, min: usize, max: usize) -> usize {
        let points = &self.points;
        let mut low = min;
        let mut high = max;

        while low < high {
            let mid = (low + high).div_ceil(2);
            if points[mid].time <= time {
                low = mid;
            } else {
                high = mid - 1;
            }
        }

        low
    }

    fn segment(&self, index: usize) -> Segment<'_> {
        let points = &self.points;
        let to_index = (index + 1).min(points.len() - 1);
        Segment {
            prev: index.checked_sub(1).map(|i| &points[i]),
            from: &points[index],
            to: &points[to_index],
            next: points.get(index + 2),
        }
    }

    fn interpolate(&self, s: f32, segment: &Segment<'_>, dst: &mut [f32]) {
        let kernel = segment.from.interpolation.kernel();
        if kernel == Kernel::Step {
            dst.copy_from_slice(&segment.from.value);
            return;
        }

        let quaternion = self.quaternion_offset.map(|offset| offset..offset + 4);
        for (i, out) in dst.iter_mut().enumerate() {
            if quaternion.as_ref().is_some_and(|range| range.contains(&i)) {
                continue;
            }
            let from = segment.from.value[i];
            *out = if from == segment.to.value[i] {
                from
            } else {
                kernel.evaluate(s, segment, i)
            };
        }

        if let Some(range) = quaternion {
            slerp(
                kernel.quaternion_parameter(s),
                &segment.from.value[range.clone()],
                &segment.to.value[range.clone()],
                &mut dst[range],
            );
        }
    }
}
