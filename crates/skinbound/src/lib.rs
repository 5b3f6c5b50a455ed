//! Animation curve evaluation and conservative bounds for skinned meshes
//!
//! - [`curve`]: multi-component keyframe curves with Bezier, B-spline,
//!   Hermite and easing segments and an optional slerped quaternion range
//! - [`bounds`]: hybrid sphere and box bounding volumes
//! - [`skinned_bounds`]: one bounding volume enclosing a skinned mesh across
//!   every animation that drives its skeleton

pub mod animation;
pub mod bounds;
pub mod curve;
pub mod error;
pub mod math;
pub mod mesh;
pub mod node;
pub mod skin;
pub mod skinned_bounds;

// Re-export common types
pub use animation::{Animation, AnimationChannel, Animations, CurveSkip, TargetAttribute};
pub use bounds::{BoundingVolume, RadiusScaling};
pub use curve::{Curve, Interpolation, Point, SrtCurve};
pub use error::{Result, SkinBoundError};
pub use math::Srt;
pub use mesh::{Mesh, Vertex, VertexElement, VertexUsage};
pub use node::{Node, NodeId, NodeTree, Pose};
pub use skin::MeshSkin;
pub use skinned_bounds::{
    BoundsOptions, BoundsOutcome, BoundsReport, SkinnedBoundsEvaluator, SkipReason,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
