//! Skin binding a mesh to a joint hierarchy

use glam::{Mat4, Vec3};

use crate::bounds::BoundingVolume;
use crate::error::{Result, SkinBoundError};
use crate::mesh::Mesh;
use crate::node::{NodeId, NodeTree};

/// Joints, bind poses and bind shape of a skinned mesh
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSkin {
    /// Joints in skinning order; vertex blend indices refer to positions here
    pub joints: Vec<NodeId>,
    /// Inverse bind matrix for each joint
    pub bind_poses: Vec<Mat4>,
    /// Transform applied to the mesh before binding
    pub bind_shape: Mat4,
    /// Local bounds of the vertices each joint influences, filled by
    /// [`compute_joint_bounds`](Self::compute_joint_bounds)
    pub joint_bounds: Vec<BoundingVolume>,
}

impl Default for MeshSkin {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

impl MeshSkin {
    pub fn new(bind_shape: Mat4) -> Self {
        Self {
            joints: Vec::new(),
            bind_poses: Vec::new(),
            bind_shape,
            joint_bounds: Vec::new(),
        }
    }

    /// Append a joint with its bind pose, returning its skin index
    pub fn add_joint(&mut self, joint: NodeId, bind_pose: Mat4) -> usize {
        self.joints.push(joint);
        self.bind_poses.push(bind_pose);
        self.joints.len() - 1
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn joint_index(&self, node: NodeId) -> Option<usize> {
        self.joints.iter().position(|j| *j == node)
    }

    pub fn contains_joint(&self, node: NodeId) -> bool {
        self.joint_index(node).is_some()
    }

    /// Check that every joint has a bind pose and exists in `tree`
    pub fn validate(&self, tree: &NodeTree) -> Result<()> {
        if self.joints.len() != self.bind_poses.len() {
            return Err(SkinBoundError::BindPoseMismatch {
                joints: self.joints.len(),
                bind_poses: self.bind_poses.len(),
            });
        }
        for joint in &self.joints {
            tree.get(*joint)?;
        }
        Ok(())
    }

    /// Topmost joint of the skeleton containing the first joint
    ///
    /// Walks every ancestor of the first joint and keeps the highest one that
    /// is itself a joint of this skin. Nodes above it are not part of the
    /// skeleton.
    pub fn root_joint(&self, tree: &NodeTree) -> Result<Option<NodeId>> {
        let Some(&first) = self.joints.first() else {
            return Ok(None);
        };

        let mut root = first;
        let mut current = tree.parent(first)?;
        while let Some(ancestor) = current {
            if self.contains_joint(ancestor) {
                root = ancestor;
            }
            current = tree.parent(ancestor)?;
        }
        Ok(Some(root))
    }

    /// Rebuild the per-joint local bounds from the mesh vertices
    ///
    /// A vertex belongs to joint `i` when one of its influence slots names
    /// `i` with a weight whose magnitude exceeds `weight_epsilon`. Joints
    /// without vertices get an empty volume.
    pub fn compute_joint_bounds(&mut self, mesh: &Mesh, weight_epsilon: f32) {
        self.joint_bounds = (0..self.joints.len())
            .map(|index| {
                let joint = index as u32;
                let positions: Vec<Vec3> = mesh
                    .vertices
                    .iter()
                    .filter(|v| v.influenced_by(joint, weight_epsilon))
                    .map(|v| v.position)
                    .collect();
                let bounds = BoundingVolume::from_points(positions.iter().copied());
                log::trace!(
                    "joint {} ({}) influences {} vertices, radius {}",
                    index,
                    self.joints[index],
                    positions.len(),
                    bounds.radius
                );
                bounds
            })
            .collect();
    }
}
