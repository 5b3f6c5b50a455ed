//! Mesh vertex data consumed by the bounds computation

use glam::Vec3;

use crate::bounds::BoundingVolume;

/// Maximum number of joint influences per vertex
pub const MAX_INFLUENCES: usize = 4;

/// Semantic of a vertex element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum VertexUsage {
    Position,
    Normal,
    Color,
    Tangent,
    Binormal,
    BlendWeights,
    BlendIndices,
    TexCoord(u8),
}

/// One element of a vertex format: a usage and its float count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexElement {
    pub usage: VertexUsage,
    pub size: usize,
}

impl VertexElement {
    pub const fn new(usage: VertexUsage, size: usize) -> Self {
        Self { usage, size }
    }
}

/// A skinned vertex
///
/// Unused influence slots carry a zero weight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub position: Vec3,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub normal: Vec3,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub blend_indices: [u32; MAX_INFLUENCES],
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub blend_weights: [f32; MAX_INFLUENCES],
}

impl Vertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Vertex fully weighted to a single joint
    pub fn rigid(position: Vec3, joint: u32) -> Self {
        Self {
            position,
            blend_indices: [joint, 0, 0, 0],
            blend_weights: [1.0, 0.0, 0.0, 0.0],
            ..Self::default()
        }
    }

    /// Whether any slot names `joint` with a weight above `epsilon`
    pub fn influenced_by(&self, joint: u32, epsilon: f32) -> bool {
        self.blend_indices
            .iter()
            .zip(self.blend_weights.iter())
            .any(|(&index, &weight)| index == joint && weight.abs() > epsilon)
    }
}

/// Mesh geometry with its bounds
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Mesh {
    pub id: String,
    pub vertex_format: Vec<VertexElement>,
    pub vertices: Vec<Vertex>,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub bounds: BoundingVolume,
}

impl Mesh {
    pub fn new(id: impl Into<String>, vertex_format: Vec<VertexElement>) -> Self {
        Self {
            id: id.into(),
            vertex_format,
            vertices: Vec::new(),
            bounds: BoundingVolume::empty(),
        }
    }

    /// The usual skinned layout: position, normal, blend weights and indices
    pub fn skinned_format() -> Vec<VertexElement> {
        vec![
            VertexElement::new(VertexUsage::Position, 3),
            VertexElement::new(VertexUsage::Normal, 3),
            VertexElement::new(VertexUsage::BlendWeights, MAX_INFLUENCES),
            VertexElement::new(VertexUsage::BlendIndices, MAX_INFLUENCES),
        ]
    }

    /// Float offset of the element with `usage` inside one vertex
    pub fn element_offset(&self, usage: VertexUsage) -> Option<usize> {
        let mut offset = 0;
        for element in &self.vertex_format {
            if element.usage == usage {
                return Some(offset);
            }
            offset += element.size;
        }
        None
    }

    pub fn has_element(&self, usage: VertexUsage) -> bool {
        self.element_offset(usage).is_some()
    }

    /// Vertex size in floats
    pub fn vertex_stride(&self) -> usize {
        self.vertex_format.iter().map(|e| e.size).sum()
    }

    /// Bounds of every vertex position, ignoring skinning
    pub fn static_bounds(&self) -> BoundingVolume {
        BoundingVolume::from_points(self.vertices.iter().map(|v| v.position))
    }
}
