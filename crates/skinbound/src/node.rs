//! Node hierarchy and scratch poses
//!
//! [`NodeTree`] is an arena of nodes with parent/child links and local
//! transforms. World matrices are resolved on demand by walking the parent
//! chain.
//!
//! [`Pose`] layers local-transform overrides and an optional root cut on top
//! of a borrowed tree, so animation can be simulated without touching the
//! tree itself.

use std::collections::HashMap;
use std::fmt;

use glam::Mat4;

use crate::error::{Result, SkinBoundError};

/// Index of a node in a [`NodeTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Name used by skins and animation channels to refer to this node
    pub id: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    transform: Mat4,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Local transform relative to the parent
    pub fn transform(&self) -> Mat4 {
        self.transform
    }
}

/// Arena of nodes forming a forest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeTree {
    nodes: Vec<Node>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a parentless node with the given local transform
    pub fn add_node(&mut self, id: impl Into<String>, transform: Mat4) -> NodeId {
        let node_id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id: id.into(),
            parent: None,
            children: Vec::new(),
            transform,
        });
        node_id
    }

    pub fn get(&self, node: NodeId) -> Result<&Node> {
        self.nodes
            .get(node.0)
            .ok_or(SkinBoundError::InvalidNode(node.0))
    }

    fn get_mut(&mut self, node: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(node.0)
            .ok_or(SkinBoundError::InvalidNode(node.0))
    }

    /// Look up a node by name
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.id == id).map(NodeId)
    }

    /// Look up a node by name, failing if it does not exist
    pub fn resolve(&self, id: &str) -> Result<NodeId> {
        self.find(id)
            .ok_or_else(|| SkinBoundError::UnknownNode(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(node)?.parent)
    }

    pub fn children(&self, node: NodeId) -> Result<&[NodeId]> {
        Ok(&self.get(node)?.children)
    }

    /// Attach `child` under `parent`, detaching it from any previous parent
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.get(child)?;
        if self.is_ancestor_or_self(child, parent)? {
            return Err(SkinBoundError::HierarchyCycle {
                parent: parent.0,
                child: child.0,
            });
        }

        if let Some(old_parent) = self.get(child)?.parent {
            self.remove_child(old_parent, child)?;
        }
        self.get_mut(parent)?.children.push(child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detach `child` from `parent`; a no-op if it is not a child of `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self.get_mut(parent)?;
        let before = parent_node.children.len();
        parent_node.children.retain(|c| *c != child);
        if parent_node.children.len() != before {
            self.get_mut(child)?.parent = None;
        }
        Ok(())
    }

    pub fn transform_matrix(&self, node: NodeId) -> Result<Mat4> {
        Ok(self.get(node)?.transform)
    }

    pub fn set_transform_matrix(&mut self, node: NodeId, transform: Mat4) -> Result<()> {
        self.get_mut(node)?.transform = transform;
        Ok(())
    }

    /// World transform: the product of the local transforms from the top
    /// of the hierarchy down to `node`
    pub fn world_matrix(&self, node: NodeId) -> Result<Mat4> {
        Pose::new(self).world_matrix(node)
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> Result<bool> {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            current = self.get(id)?.parent;
        }
        Ok(false)
    }
}

/// Scratch view of a [`NodeTree`] with overridden local transforms
///
/// When a root cut is set, world matrices of nodes below it stop
/// accumulating at the cut node, as if it had no parent.
#[derive(Debug, Clone)]
pub struct Pose<'a> {
    tree: &'a NodeTree,
    overrides: HashMap<NodeId, Mat4>,
    root_cut: Option<NodeId>,
}

impl<'a> Pose<'a> {
    pub fn new(tree: &'a NodeTree) -> Self {
        Self {
            tree,
            overrides: HashMap::new(),
            root_cut: None,
        }
    }

    /// Treat `root` as parentless when resolving world matrices
    pub fn with_root_cut(mut self, root: NodeId) -> Self {
        self.root_cut = Some(root);
        self
    }

    pub fn root_cut(&self) -> Option<NodeId> {
        self.root_cut
    }

    pub fn tree(&self) -> &'a NodeTree {
        self.tree
    }

    /// Override the local transform of `node`
    pub fn set_local(&mut self, node: NodeId, transform: Mat4) {
        self.overrides.insert(node, transform);
    }

    /// Local transform of `node`, taking overrides into account
    pub fn local(&self, node: NodeId) -> Result<Mat4> {
        match self.overrides.get(&node) {
            Some(m) => Ok(*m),
            None => self.tree.transform_matrix(node),
        }
    }

    /// World transform of `node` under this pose
    pub fn world_matrix(&self, node: NodeId) -> Result<Mat4> {
        let mut world = Mat4::IDENTITY;
        let mut current = Some(node);
        let mut depth = 0;

        while let Some(id) = current {
            world = self.local(id)? * world;
            if self.root_cut == Some(id) {
                break;
            }
            current = self.tree.get(id)?.parent;

            depth += 1;
            if depth > self.tree.len() {
                return Err(SkinBoundError::HierarchyCycle {
                    parent: id.0,
                    child: node.0,
                });
            }
        }

        Ok(world)
    }

    pub fn clear(&mut self) {
        self.overrides.clear();
    }
}
