//! JSON scene documents

use anyhow::{Context, Result, bail};
use glam::{Mat4, Quat, Vec3};
use serde::Deserialize;
use skinbound::{Animations, Mesh, MeshSkin, NodeTree};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A node as written in the document
///
/// `matrix` (16 floats, column-major) wins over the decomposed fields.
#[derive(Debug, Deserialize)]
pub struct NodeDef {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub matrix: Option<Mat4>,
    #[serde(default)]
    pub translation: Option<Vec3>,
    #[serde(default)]
    pub rotation: Option<Quat>,
    #[serde(default)]
    pub scale: Option<Vec3>,
}

impl NodeDef {
    fn transform(&self) -> Mat4 {
        self.matrix.unwrap_or_else(|| {
            Mat4::from_scale_rotation_translation(
                self.scale.unwrap_or(Vec3::ONE),
                self.rotation.unwrap_or(Quat::IDENTITY).normalize(),
                self.translation.unwrap_or(Vec3::ZERO),
            )
        })
    }
}

/// Skin binding referring to joints by node id
#[derive(Debug, Deserialize)]
pub struct SkinDef {
    pub joints: Vec<String>,
    /// Inverse bind matrices; identity for every joint when omitted
    #[serde(default)]
    pub bind_poses: Vec<Mat4>,
    #[serde(default)]
    pub bind_shape: Option<Mat4>,
}

/// On-disk layout of a scene
#[derive(Debug, Deserialize)]
pub struct SceneDocument {
    pub nodes: Vec<NodeDef>,
    pub mesh: Mesh,
    pub skin: SkinDef,
    #[serde(default)]
    pub animations: Animations,
}

/// A scene resolved into the library's types
#[derive(Debug)]
pub struct Scene {
    pub tree: NodeTree,
    pub mesh: Mesh,
    pub skin: MeshSkin,
    pub animations: Animations,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open scene: {}", path.display()))?;
        let document: SceneDocument = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse scene: {}", path.display()))?;
        Self::from_document(document)
    }

    pub fn from_document(document: SceneDocument) -> Result<Self> {
        let mut tree = NodeTree::new();
        let mut seen = HashSet::new();
        for node in &document.nodes {
            if !seen.insert(node.id.as_str()) {
                bail!("Duplicate node id: {}", node.id);
            }
            tree.add_node(node.id.clone(), node.transform());
        }

        // Parents may be declared after their children
        for node in &document.nodes {
            if let Some(parent) = &node.parent {
                let parent = tree
                    .resolve(parent)
                    .with_context(|| format!("Parent of node {}", node.id))?;
                let child = tree.resolve(&node.id)?;
                tree.add_child(parent, child)
                    .with_context(|| format!("Failed to attach node {}", node.id))?;
            }
        }

        let SkinDef {
            joints,
            bind_poses,
            bind_shape,
        } = document.skin;
        if !bind_poses.is_empty() && bind_poses.len() != joints.len() {
            bail!(
                "Skin lists {} joints but {} bind poses",
                joints.len(),
                bind_poses.len()
            );
        }

        let mut skin = MeshSkin::new(bind_shape.unwrap_or(Mat4::IDENTITY));
        for (index, joint) in joints.iter().enumerate() {
            let node = tree
                .resolve(joint)
                .with_context(|| format!("Skin joint {index}"))?;
            let bind_pose = bind_poses.get(index).copied().unwrap_or(Mat4::IDENTITY);
            skin.add_joint(node, bind_pose);
        }

        log::info!(
            "Loaded scene: {} nodes, {} vertices, {} joints, {} animations",
            tree.len(),
            document.mesh.vertices.len(),
            skin.joint_count(),
            document.animations.animation_count()
        );

        Ok(Self {
            tree,
            mesh: document.mesh,
            skin,
            animations: document.animations,
        })
    }
}
