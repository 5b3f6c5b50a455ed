//! Hybrid sphere and axis-aligned box bounds

use glam::{Mat4, Vec3};

use crate::math::{max_abs_translation, max_axis_scale};

/// How [`BoundingVolume::transform_with`] scales the sphere radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "lowercase"))]
pub enum RadiusScaling {
    /// Largest axis scale of the matrix, which keeps the sphere conservative
    #[default]
    Scale,
    /// Largest absolute translation component of the matrix
    ///
    /// Reproduces the radius produced by older content pipelines, for
    /// comparing output against them.
    Translation,
}

/// Sphere and axis-aligned box describing the same region
///
/// An empty volume encloses nothing: its box is inverted (`min > max`). A
/// single point is not empty, it has a zero radius and a degenerate box.
/// Empty volumes are the identity for [`merge`](Self::merge) and are left
/// alone by `transform`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingVolume {
    pub center: Vec3,
    pub radius: f32,
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingVolume {
    pub const fn empty() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 0.0,
            min: Vec3::splat(f32::MAX),
            max: Vec3::splat(f32::MIN),
        }
    }

    pub fn new(center: Vec3, radius: f32, min: Vec3, max: Vec3) -> Self {
        debug_assert!(radius >= 0.0);
        Self {
            center,
            radius,
            min,
            max,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Bounds of a point set
    ///
    /// The box is the exact extent of the points, the center is the box
    /// midpoint and the radius reaches the farthest point. No points gives
    /// an empty volume.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        let points: Vec<Vec3> = points.into_iter().collect();
        if points.is_empty() {
            return Self::empty();
        }

        let (min, max) = points.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        );
        let center = (min + max) * 0.5;
        let radius = points
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0_f32, f32::max);

        Self {
            center,
            radius,
            min,
            max,
        }
    }

    /// Transform by an affine matrix, scaling the radius by the largest axis scale
    pub fn transform(&self, matrix: &Mat4) -> Self {
        self.transform_with(matrix, RadiusScaling::Scale)
    }

    pub fn transform_with(&self, matrix: &Mat4, scaling: RadiusScaling) -> Self {
        if self.is_empty() {
            return *self;
        }

        let center = matrix.transform_point3(self.center);
        let factor = match scaling {
            RadiusScaling::Scale => max_axis_scale(matrix),
            RadiusScaling::Translation => max_abs_translation(matrix),
        };
        let radius = self.radius * factor;

        let (min, max) = self.corners().iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(min, max), corner| {
                let p = matrix.transform_point3(*corner);
                (min.min(p), max.max(p))
            },
        );

        Self {
            center,
            radius,
            min,
            max,
        }
    }

    /// The 8 corners of the box part
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Grow this volume to also enclose `other`
    pub fn merge(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }

        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);

        let distance = self.center.distance(other.center);

        if distance <= other.radius - self.radius {
            // Other sphere already contains this one
            self.center = other.center;
            self.radius = other.radius;
        } else if distance <= self.radius - other.radius {
            // This sphere already contains the other
        } else {
            let radius = (self.radius + other.radius + distance) * 0.5;
            let direction = (self.center - other.center) / distance;
            self.center = other.center + direction * (radius - other.radius);
            self.radius = radius;
        }
    }

    /// Merged copy of two volumes
    pub fn merged(mut self, other: &Self) -> Self {
        self.merge(other);
        self
    }

    /// Whether `point` lies inside the sphere part
    pub fn sphere_contains(&self, point: Vec3) -> bool {
        !self.is_empty() && point.distance(self.center) <= self.radius + crate::math::EPSILON
    }

    /// Whether `point` lies inside the box part
    pub fn box_contains(&self, point: Vec3) -> bool {
        !self.is_empty() && point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
