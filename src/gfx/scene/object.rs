use std::fmt;

use cgmath::{Matrix4, Vector3};

use crate::{
    error::SceneError,
    gfx::{
        picking::BoundingBox,
        transform::{compute_matrix, Transform},
    },
};

/// Registry-assigned object identifier. Never reused within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub(crate) u64);

impl ObjectId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque reference to mesh buffers owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Per-object uniform for the renderer: the model matrix in column-major order.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
}

/// A placed, pickable object.
///
/// Transform fields are only reachable through validating setters, each of
/// which recomputes the model matrix before returning. A rejected setter
/// leaves the object untouched.
#[derive(Debug, Clone)]
pub struct SceneObject {
    id: ObjectId,
    mesh: MeshHandle,
    bounds: BoundingBox,
    transform: Transform,
    matrix: Matrix4<f32>,
    /// Master switch for rendering and picking.
    pub enabled: bool,
}

impl SceneObject {
    pub(crate) fn new(
        id: ObjectId,
        mesh: MeshHandle,
        bounds: BoundingBox,
        origin: Vector3<f32>,
    ) -> Result<Self, SceneError> {
        let transform = Transform::with_origin(origin);
        let matrix = compute_matrix(&transform)?;

        Ok(Self {
            id,
            mesh,
            bounds,
            transform,
            matrix,
            enabled: true,
        })
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Include or exclude this object from picking without hiding it.
    pub fn set_collision_enabled(&mut self, enabled: bool) {
        self.bounds.enabled = enabled;
    }

    /// True when picking should consider this object.
    pub fn is_pickable(&self) -> bool {
        self.enabled && self.bounds.enabled
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn location(&self) -> Vector3<f32> {
        self.transform.location
    }

    pub fn rotation(&self) -> Vector3<f32> {
        self.transform.rotation
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.transform.scale
    }

    pub fn origin(&self) -> Vector3<f32> {
        self.transform.origin
    }

    /// Model matrix derived from the current transform.
    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    /// Replace the whole transform at once.
    pub fn set_transform(&mut self, transform: Transform) -> Result<(), SceneError> {
        self.matrix = compute_matrix(&transform)?;
        self.transform = transform;
        Ok(())
    }

    pub fn set_location(&mut self, location: Vector3<f32>) -> Result<(), SceneError> {
        self.set_transform(Transform {
            location,
            ..self.transform
        })
    }

    /// Euler angles in radians.
    pub fn set_rotation(&mut self, rotation: Vector3<f32>) -> Result<(), SceneError> {
        self.set_transform(Transform {
            rotation,
            ..self.transform
        })
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) -> Result<(), SceneError> {
        self.set_transform(Transform {
            scale,
            ..self.transform
        })
    }

    pub fn set_origin(&mut self, origin: Vector3<f32>) -> Result<(), SceneError> {
        self.set_transform(Transform {
            origin,
            ..self.transform
        })
    }

    /// Move by `offset` in world space.
    pub fn translate(&mut self, offset: Vector3<f32>) -> Result<(), SceneError> {
        self.set_location(self.transform.location + offset)
    }

    /// Add `delta` radians to the Euler angles.
    pub fn rotate(&mut self, delta: Vector3<f32>) -> Result<(), SceneError> {
        self.set_rotation(self.transform.rotation + delta)
    }

    /// Reset location, rotation and scale, keeping the pivot.
    pub fn reset_transform(&mut self) -> Result<(), SceneError> {
        self.set_transform(Transform::with_origin(self.transform.origin))
    }

    pub fn uniform(&self) -> ObjectUniform {
        ObjectUniform {
            model: self.matrix.into(),
        }
    }
}
