//! # Procedural Geometry Generation
//!
//! Every object constructor funnels through one output type,
//! [`ObjectTemplate`]: raw mesh data for the renderer plus the bounding box
//! and pivot the scene needs. The picking and transform code never looks at
//! the mesh itself.
//!
//! ## Supported Sources
//!
//! - **Cube**: unit cube with quad faces and an edge list
//! - **Triangles**: imported triangle soup, optionally normalised into the unit box
//!
//! ## Usage
//!
//! ```
//! use seisview::gfx::geometry::{ObjectTemplate, Topology};
//!
//! let cube = ObjectTemplate::cube();
//! assert_eq!(cube.mesh.topology, Topology::Quads);
//! assert_eq!(cube.mesh.primitive_count(), 6);
//! ```

pub mod primitives;

use cgmath::Vector3;

use crate::{
    error::SceneError,
    gfx::{picking::BoundingBox, scene::vertex::ColoredVertex},
};

/// How `MeshData::surfaces` is grouped into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Quads,
    Lines,
}

impl Topology {
    pub fn vertices_per_primitive(self) -> usize {
        match self {
            Topology::Triangles => 3,
            Topology::Quads => 4,
            Topology::Lines => 2,
        }
    }
}

/// Raw mesh data ready for GPU upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex colors, same length as `positions`
    pub colors: Vec<[f32; 3]>,
    /// Face indices grouped according to `topology`
    pub surfaces: Vec<u32>,
    /// Line-pair indices for wireframe overlays
    pub edges: Vec<u32>,
    pub topology: Topology,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn primitive_count(&self) -> usize {
        self.surfaces.len() / self.topology.vertices_per_primitive()
    }

    /// Check index ranges and primitive grouping.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.positions.is_empty() {
            return Err(SceneError::EmptyMesh);
        }

        let len = self.positions.len();
        if let Some(&index) = self
            .surfaces
            .iter()
            .chain(&self.edges)
            .find(|&&index| index as usize >= len)
        {
            return Err(SceneError::IndexOutOfRange { index, len });
        }

        if self.surfaces.len() % self.topology.vertices_per_primitive() != 0 {
            return Err(SceneError::IncompletePrimitive {
                topology: self.topology,
                len: self.surfaces.len(),
            });
        }
        if self.edges.len() % 2 != 0 {
            return Err(SceneError::IncompletePrimitive {
                topology: Topology::Lines,
                len: self.edges.len(),
            });
        }

        Ok(())
    }

    /// Interleave positions and colors. Missing colors default to white.
    pub fn vertices(&self) -> Vec<ColoredVertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, &position)| ColoredVertex {
                position,
                color: self.colors.get(i).copied().unwrap_or([1.0, 1.0, 1.0]),
            })
            .collect()
    }
}

/// Everything needed to place a new object: mesh data for the renderer,
/// local bounds and pivot for the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTemplate {
    pub mesh: MeshData,
    pub bounds: BoundingBox,
    pub origin: Vector3<f32>,
}

impl ObjectTemplate {
    /// Unit cube spanning `[0, 1]` on every axis, pivoting about its centre.
    pub fn cube() -> Self {
        primitives::cube()
    }

    /// Template for imported triangle geometry. See
    /// [`primitives::from_triangles`].
    pub fn from_triangles(
        positions: Vec<[f32; 3]>,
        normalize: bool,
        color: [f32; 3],
    ) -> Result<Self, SceneError> {
        primitives::from_triangles(positions, normalize, color)
    }
}
