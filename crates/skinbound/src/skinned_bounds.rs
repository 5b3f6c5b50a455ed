//! Conservative bounds for skinned meshes across their whole animation
//!
//! The evaluator builds local bounds for each joint from the vertices it
//! influences, samples every scale/rotate/translate channel targeting the
//! skeleton at a fixed step, and merges the world-space joint bounds of
//! every sampled pose into a single volume.
//!
//! # Example
//!
//! ```rust
//! use glam::{Mat4, Vec3};
//! use skinbound::{
//!     Animations, BoundsOptions, Mesh, MeshSkin, NodeTree, SkinnedBoundsEvaluator, Vertex,
//! };
//!
//! let mut tree = NodeTree::new();
//! let root = tree.add_node("root", Mat4::IDENTITY);
//!
//! let mut skin = MeshSkin::default();
//! skin.add_joint(root, Mat4::IDENTITY);
//!
//! let mut mesh = Mesh::new("body", Mesh::skinned_format());
//! mesh.vertices = vec![
//!     Vertex::rigid(Vec3::new(-1.0, 0.0, 0.0), 0),
//!     Vertex::rigid(Vec3::new(1.0, 0.0, 0.0), 0),
//! ];
//!
//! let evaluator = SkinnedBoundsEvaluator::new(BoundsOptions::default());
//! let outcome = evaluator.compute_bounds(&mut skin, &mut mesh, &tree, &Animations::new())?;
//! assert!(outcome.is_computed());
//! assert_eq!(mesh.bounds.radius, 1.0);
//! # Ok::<(), skinbound::SkinBoundError>(())
//! ```

use std::fmt;

use crate::animation::{AnimationChannel, Animations, CurveSkip};
use crate::bounds::{BoundingVolume, RadiusScaling};
use crate::curve::SrtCurve;
use crate::error::{Result, SkinBoundError};
use crate::math::EPSILON;
use crate::mesh::{Mesh, VertexUsage};
use crate::node::{NodeId, NodeTree, Pose};
use crate::skin::MeshSkin;

/// Default simulation step, roughly 30 samples per second
pub const DEFAULT_STEP_MS: f32 = 33.0;

/// Options controlling the bounds computation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundsOptions {
    /// Time between samples, in the animation channels' time units
    pub step_ms: f32,
    /// Blend weights at or below this magnitude do not bind a vertex to a joint
    pub weight_epsilon: f32,
    /// How joint bound radii are scaled by joint matrices
    pub radius_scaling: RadiusScaling,
}

impl Default for BoundsOptions {
    fn default() -> Self {
        Self {
            step_ms: DEFAULT_STEP_MS,
            weight_epsilon: EPSILON,
            radius_scaling: RadiusScaling::Scale,
        }
    }
}

/// Why a computation left the mesh bounds untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingBlendIndices,
    MissingBlendWeights,
    NoJoints,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBlendIndices => write!(f, "vertex format has no blend indices"),
            Self::MissingBlendWeights => write!(f, "vertex format has no blend weights"),
            Self::NoJoints => write!(f, "skin has no joints"),
        }
    }
}

/// Summary of a successful computation
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsReport {
    /// Bounds assigned to the mesh
    pub bounds: BoundingVolume,
    /// Topmost joint of the skeleton
    pub root_joint: NodeId,
    /// Whether the root joint's parent was excluded from world transforms
    pub root_detached: bool,
    /// Number of channels sampled
    pub curve_count: usize,
    /// Number of channels targeting the skin that produced no curve
    pub skipped_channels: usize,
    /// Longest channel duration, in the channels' time units
    pub max_duration: f32,
    /// Number of simulated poses
    pub step_count: usize,
}

/// Result of [`SkinnedBoundsEvaluator::compute_bounds`]
#[derive(Debug, Clone, PartialEq)]
pub enum BoundsOutcome {
    Computed(BoundsReport),
    Skipped(SkipReason),
}

impl BoundsOutcome {
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    pub fn report(&self) -> Option<&BoundsReport> {
        match self {
            Self::Computed(report) => Some(report),
            Self::Skipped(_) => None,
        }
    }

    pub fn bounds(&self) -> Option<&BoundingVolume> {
        self.report().map(|r| &r.bounds)
    }
}

/// Simulation times `0, step, 2 * step, ...`, always ending exactly on `end`
///
/// Times are derived from an integer index so long animations never stall
/// on float precision.
#[derive(Debug, Clone)]
struct SampleTimes {
    step: f64,
    end: f64,
    index: u64,
    done: bool,
}

impl SampleTimes {
    fn new(step: f64, end: f64) -> Self {
        Self {
            step,
            end,
            index: 0,
            done: false,
        }
    }
}

impl Iterator for SampleTimes {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }
        let time = (self.index as f64 * self.step).min(self.end);
        self.index += 1;
        self.done = time >= self.end;
        Some(time)
    }
}

/// A curve and the joint it drives
struct JointTrack {
    joint: NodeId,
    curve: SrtCurve,
}

/// Curves built for one computation
struct Tracks {
    tracks: Vec<JointTrack>,
    max_duration: f32,
    skipped: usize,
}

/// Computes skinned mesh bounds over all animations targeting the skin
#[derive(Debug, Clone, Default)]
pub struct SkinnedBoundsEvaluator {
    options: BoundsOptions,
}

impl SkinnedBoundsEvaluator {
    pub fn new(options: BoundsOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BoundsOptions {
        &self.options
    }

    /// Compute the bounds of `mesh` across every animation in `animations`
    ///
    /// On success the bounds are written to `mesh.bounds` and the per-joint
    /// local bounds to `skin.joint_bounds`. Meshes without blend indices or
    /// weights, and skins without joints, are skipped and keep their bounds.
    /// `tree` is only read; animated transforms live in a scratch [`Pose`].
    pub fn compute_bounds(
        &self,
        skin: &mut MeshSkin,
        mesh: &mut Mesh,
        tree: &NodeTree,
        animations: &Animations,
    ) -> Result<BoundsOutcome> {
        let step = self.options.step_ms;
        if !(step.is_finite() && step > 0.0) {
            return Err(SkinBoundError::InvalidStep(step));
        }

        if let Some(reason) = Self::precheck(skin, mesh) {
            log::warn!("Skipping bounds for mesh {}: {}", mesh.id, reason);
            return Ok(BoundsOutcome::Skipped(reason));
        }
        skin.validate(tree)?;

        log::debug!("Computing bounds for skin of mesh: {}", mesh.id);

        let Some(root_joint) = skin.root_joint(tree)? else {
            return Ok(BoundsOutcome::Skipped(SkipReason::NoJoints));
        };
        let root_detached = tree.parent(root_joint)?.is_some();
        if root_detached {
            log::debug!(
                "Excluding parent of root joint {} from world transforms",
                tree.get(root_joint)?.id
            );
        }
        let mut pose = Pose::new(tree).with_root_cut(root_joint);

        log::debug!("{} joints found", skin.joint_count());
        skin.compute_joint_bounds(mesh, self.options.weight_epsilon);

        let Tracks {
            tracks,
            max_duration,
            skipped,
        } = Self::build_tracks(skin, tree, animations)?;
        log::debug!(
            "Built {} curves, max duration {}, {} channels skipped",
            tracks.len(),
            max_duration,
            skipped
        );

        let mut bounds = BoundingVolume::empty();
        let mut step_count = 0;

        for time in SampleTimes::new(f64::from(step), f64::from(max_duration)) {
            let normalized = if max_duration > 0.0 {
                (time / f64::from(max_duration)) as f32
            } else {
                0.0
            };
            for track in &tracks {
                pose.set_local(track.joint, track.curve.evaluate(normalized).to_matrix());
            }

            self.merge_pose(skin, &pose, &mut bounds)?;
            step_count += 1;
            log::trace!(
                "t={} ({:.3}) radius {} center {}",
                time,
                normalized,
                bounds.radius,
                bounds.center
            );
        }

        mesh.bounds = bounds;
        log::debug!(
            "Bounds for {}: center {} radius {} after {} steps",
            mesh.id,
            bounds.center,
            bounds.radius,
            step_count
        );

        Ok(BoundsOutcome::Computed(BoundsReport {
            bounds,
            root_joint,
            root_detached,
            curve_count: tracks.len(),
            skipped_channels: skipped,
            max_duration,
            step_count,
        }))
    }

    fn precheck(skin: &MeshSkin, mesh: &Mesh) -> Option<SkipReason> {
        if !mesh.has_element(VertexUsage::BlendIndices) {
            Some(SkipReason::MissingBlendIndices)
        } else if !mesh.has_element(VertexUsage::BlendWeights) {
            Some(SkipReason::MissingBlendWeights)
        } else if skin.joints.is_empty() {
            Some(SkipReason::NoJoints)
        } else {
            None
        }
    }

    /// One curve per distinct channel targeting a joint of the skin
    fn build_tracks(skin: &MeshSkin, tree: &NodeTree, animations: &Animations) -> Result<Tracks> {
        let mut seen: Vec<&AnimationChannel> = Vec::new();
        let mut tracks = Vec::new();
        let mut max_duration = 0.0_f32;
        let mut skipped = 0;

        for &joint in &skin.joints {
            let target = &tree.get(joint)?.id;
            for channel in animations.channels_targeting(target) {
                if seen.iter().any(|c| std::ptr::eq(*c, channel)) {
                    continue;
                }
                seen.push(channel);

                match channel.srt_curve() {
                    Ok(curve) => {
                        max_duration = max_duration.max(channel.duration());
                        tracks.push(JointTrack { joint, curve });
                    }
                    Err(reason @ CurveSkip::Unsupported(_)) => {
                        log::debug!("Skipping channel for {}: {}", target, reason);
                        skipped += 1;
                    }
                    Err(reason) => {
                        log::warn!("Skipping channel for {}: {}", target, reason);
                        skipped += 1;
                    }
                }
            }
        }

        Ok(Tracks {
            tracks,
            max_duration,
            skipped,
        })
    }

    /// Merge the world-space bounds of every joint in `pose` into `bounds`
    fn merge_pose(&self, skin: &MeshSkin, pose: &Pose<'_>, bounds: &mut BoundingVolume) -> Result<()> {
        for (index, &joint) in skin.joints.iter().enumerate() {
            let local = &skin.joint_bounds[index];
            if local.is_empty() {
                continue;
            }
            let matrix = pose.world_matrix(joint)? * skin.bind_poses[index] * skin.bind_shape;
            bounds.merge(&local.transform_with(&matrix, self.options.radius_scaling));
        }
        Ok(())
    }
}
