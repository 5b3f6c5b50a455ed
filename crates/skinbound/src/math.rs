//! Shared math helpers built on glam
//!
//! Curves store transforms as flat `f32` components; [`Srt`] is the typed
//! view used everywhere else.

use glam::{Mat4, Quat, Vec3};

/// Tolerance used for "is this value zero" tests on weights and radii
pub const EPSILON: f32 = 1e-6;

/// Number of flat components in an [`Srt`]: 3 scale, 4 rotation, 3 translation
pub const SRT_COMPONENTS: usize = 10;

/// Offset of the rotation quaternion inside the flat [`Srt`] layout
pub const SRT_ROTATION_OFFSET: usize = 3;

/// Check whether a value is zero within [`EPSILON`]
#[inline]
pub fn is_zero(value: f32) -> bool {
    value.abs() <= EPSILON
}

/// Decomposed scale/rotate/translate transform
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Srt {
    pub scale: Vec3,
    pub rotation: Quat,
    pub translation: Vec3,
}

impl Srt {
    /// Identity transform (unit scale, no rotation, no translation)
    pub const IDENTITY: Self = Self {
        scale: Vec3::ONE,
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    pub const fn new(scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        Self {
            scale,
            rotation,
            translation,
        }
    }

    /// Build from the flat layout `[sx, sy, sz, qx, qy, qz, qw, tx, ty, tz]`
    pub fn from_components(c: &[f32; SRT_COMPONENTS]) -> Self {
        Self {
            scale: Vec3::new(c[0], c[1], c[2]),
            rotation: Quat::from_xyzw(c[3], c[4], c[5], c[6]),
            translation: Vec3::new(c[7], c[8], c[9]),
        }
    }

    /// Flatten into `[sx, sy, sz, qx, qy, qz, qw, tx, ty, tz]`
    pub fn to_components(&self) -> [f32; SRT_COMPONENTS] {
        [
            self.scale.x,
            self.scale.y,
            self.scale.z,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.rotation.w,
            self.translation.x,
            self.translation.y,
            self.translation.z,
        ]
    }

    /// Compose into a local transform matrix: `T * R * S`
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Srt {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Largest absolute per-axis scale of an affine matrix
///
/// Uses the lengths of the basis columns, which equals the magnitude of the
/// decomposed scale without requiring a valid rotation part.
pub fn max_axis_scale(m: &Mat4) -> f32 {
    m.x_axis
        .truncate()
        .length()
        .max(m.y_axis.truncate().length())
        .max(m.z_axis.truncate().length())
}

/// Largest absolute translation component of an affine matrix
pub fn max_abs_translation(m: &Mat4) -> f32 {
    m.w_axis.truncate().abs().max_element()
}
