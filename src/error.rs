//! # Error Types
//!
//! One error enum per concern. Geometric outcomes such as "the ray hit
//! nothing" are not errors and are reported through `Option` instead.

use thiserror::Error;

use crate::gfx::{geometry::Topology, scene::ObjectId};

/// Rejected transform input. Scale must be non-zero on every axis and every
/// component must be finite, otherwise the object matrix becomes singular and
/// picking against it is meaningless.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    #[error("scale on the {axis} axis is zero")]
    ZeroScale { axis: char },
    #[error("{field} contains a non-finite component")]
    NonFinite { field: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("no object with id {0} in the scene")]
    UnknownObject(ObjectId),
    #[error("bounding box begin exceeds end on the {axis} axis")]
    InvalidBounds { axis: char },
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("mesh has no vertices")]
    EmptyMesh,
    #[error("index {index} out of range for {len} vertices")]
    IndexOutOfRange { index: u32, len: usize },
    #[error("{len} indices do not form whole {topology:?} primitives")]
    IncompletePrimitive { topology: Topology, len: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera has no target object")]
    NoTarget,
    #[error("camera target {0} is no longer in the scene")]
    TargetMissing(ObjectId),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickingError {
    #[error("viewport of {width}x{height} cannot be unprojected")]
    InvalidViewport { width: u32, height: u32 },
    #[error("view-projection matrix is not invertible")]
    SingularProjection,
}

/// Failure of a click that goes all the way from screen position to pick.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickError {
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Picking(#[from] PickingError),
}

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("options parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("options serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid options: {0}")]
    Invalid(String),
}

/// Failure to build or resize a [`Viewport`](crate::Viewport).
#[derive(Error, Debug)]
pub enum ViewportError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Picking(#[from] PickingError),
}
