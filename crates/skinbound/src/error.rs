use thiserror::Error;

/// Error types for curve construction and skinned bounds computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkinBoundError {
    /// Quaternion sub-range does not fit inside the curve components
    #[error(
        "Invalid quaternion offset: {offset} + 4 exceeds component count {component_count}"
    )]
    InvalidQuaternionOffset {
        offset: usize,
        component_count: usize,
    },

    /// Curve built without points or components
    #[error("Curve needs at least one point and one component")]
    EmptyCurve,

    /// Curve point carries the wrong number of values or tangents
    #[error("Curve point {index} has {actual} components, expected {expected}")]
    PointComponentMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Interpolation name not recognized
    #[error("Unknown interpolation type: {0}")]
    UnknownInterpolation(String),

    /// Raw animation target attribute id not recognized
    #[error("Unknown target attribute: {0}")]
    UnknownTargetAttribute(u32),

    /// Skin has a different number of bind poses than joints
    #[error("Bind pose mismatch: skin has {joints} joints but {bind_poses} bind poses")]
    BindPoseMismatch { joints: usize, bind_poses: usize },

    /// Node index outside of the node tree
    #[error("Invalid node index: {0}")]
    InvalidNode(usize),

    /// Node id referenced by a skin or scene was not found
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// Attaching a node would create a cycle in the hierarchy
    #[error("Hierarchy cycle: node {child} is an ancestor of {parent}")]
    HierarchyCycle { parent: usize, child: usize },

    /// Simulation time step must be positive and finite
    #[error("Invalid time step: {0}")]
    InvalidStep(f32),
}

/// Result type using SkinBoundError
pub type Result<T> = std::result::Result<T, SkinBoundError>;
