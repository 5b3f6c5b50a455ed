//! Per-segment interpolation kernels
//!
//! A [`Kernel`] evaluates one scalar component of a segment. Kernels that need
//! neighbouring points (B-spline control points, smooth Hermite tangents) read
//! them from the [`Segment`], which carries `None` at the curve boundaries.

use glam::Quat;

use super::Point;
use super::easing::Easing;

/// Evaluation strategy for a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    /// Hold the starting value for the whole segment
    Step,
    Linear,
    /// Remap `s` with an easing function, then interpolate linearly
    Eased(Easing),
    /// Cubic Bezier through `from`, `from.out`, `to.in`, `to`
    Bezier,
    /// Uniform cubic B-spline over four consecutive points
    BSpline,
    /// Cubic Hermite with the stored tangents
    Hermite,
    /// Cubic Hermite with zero tangents
    HermiteFlat,
    /// Cubic Hermite with tangents derived from the neighbouring points
    HermiteSmooth,
}

/// The points surrounding the segment being evaluated
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub prev: Option<&'a Point>,
    pub from: &'a Point,
    pub to: &'a Point,
    pub next: Option<&'a Point>,
}

impl Kernel {
    /// Parameter used for the quaternion sub-range of this segment
    pub fn quaternion_parameter(self, s: f32) -> f32 {
        match self {
            Self::Step => 0.0,
            Self::Eased(easing) => easing.apply(s),
            _ => s,
        }
    }

    /// Evaluate component `i` of the segment at parameter `s`
    pub fn evaluate(self, s: f32, segment: &Segment<'_>, i: usize) -> f32 {
        let from = segment.from.value[i];
        let to = segment.to.value[i];
        match self {
            Self::Step => from,
            Self::Linear => lerp(s, from, to),
            Self::Eased(easing) => lerp(easing.apply(s), from, to),
            Self::Bezier => bezier(
                s,
                from,
                segment.from.out_value[i],
                segment.to.in_value[i],
                to,
            ),
            Self::BSpline => {
                let c0 = segment.prev.map_or(from, |p| p.value[i]);
                let c3 = segment.next.map_or(to, |p| p.value[i]);
                bspline(s, c0, from, to, c3)
            }
            Self::Hermite => hermite(
                s,
                from,
                segment.from.out_value[i],
                to,
                segment.to.in_value[i],
            ),
            Self::HermiteFlat => hermite(s, from, 0.0, to, 0.0),
            Self::HermiteSmooth => {
                let (out_tangent, in_tangent) = smooth_tangents(segment, i);
                hermite(s, from, out_tangent, to, in_tangent)
            }
        }
    }
}

/// Tangents for smooth Hermite, scaled by the relative segment durations
fn smooth_tangents(segment: &Segment<'_>, i: usize) -> (f32, f32) {
    let from = segment.from;
    let to = segment.to;
    let delta = to.value[i] - from.value[i];

    let out_tangent = match segment.prev {
        Some(prev) => {
            (to.value[i] - prev.value[i]) * ((from.time - prev.time) / (to.time - prev.time))
        }
        None => delta,
    };
    let in_tangent = match segment.next {
        Some(next) => {
            (next.value[i] - from.value[i]) * ((to.time - from.time) / (next.time - from.time))
        }
        None => delta,
    };

    (out_tangent, in_tangent)
}

#[inline]
pub fn lerp(s: f32, from: f32, to: f32) -> f32 {
    from + (to - from) * s
}

pub fn bezier(s: f32, from: f32, from_out: f32, to_in: f32, to: f32) -> f32 {
    let inv = 1.0 - s;
    let inv2 = inv * inv;
    let s2 = s * s;
    inv2 * inv * from + 3.0 * s * inv2 * from_out + 3.0 * s2 * inv * to_in + s2 * s * to
}

pub fn bspline(s: f32, c0: f32, c1: f32, c2: f32, c3: f32) -> f32 {
    let s2 = s * s;
    let s3 = s2 * s;
    let eq0 = (-s3 + 3.0 * s2 - 3.0 * s + 1.0) / 6.0;
    let eq1 = (3.0 * s3 - 6.0 * s2 + 4.0) / 6.0;
    let eq2 = (-3.0 * s3 + 3.0 * s2 + 3.0 * s + 1.0) / 6.0;
    let eq3 = s3 / 6.0;
    eq0 * c0 + eq1 * c1 + eq2 * c2 + eq3 * c3
}

pub fn hermite(s: f32, from: f32, out_tangent: f32, to: f32, in_tangent: f32) -> f32 {
    let s2 = s * s;
    let s3 = s2 * s;
    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h10 = s3 - 2.0 * s2 + s;
    let h11 = s3 - s2;
    h00 * from + h01 * to + h10 * out_tangent + h11 * in_tangent
}

/// Spherical interpolation of two `[x, y, z, w]` quaternions
///
/// The result is renormalized so unit inputs always give a unit output.
pub fn slerp(s: f32, from: &[f32], to: &[f32], dst: &mut [f32]) {
    let a = Quat::from_xyzw(from[0], from[1], from[2], from[3]);
    let b = Quat::from_xyzw(to[0], to[1], to[2], to[3]);
    let q = a.slerp(b, s).normalize();
    dst[..4].copy_from_slice(&q.to_array());
}
