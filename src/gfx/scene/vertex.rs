//! # Vertex Data Structures
//!
//! GPU-compatible vertex layout for meshes produced by the geometry
//! factories. The renderer uploads these as-is.

use std::mem;

/// A 3D vertex with position and color data.
///
/// The `#[repr(C)]` attribute gives the struct a C-compatible memory layout,
/// which is required for GPU buffer operations.
///
/// # Examples
///
/// ```
/// use seisview::gfx::scene::vertex::ColoredVertex;
///
/// let vertex = ColoredVertex {
///     position: [0.0, 1.0, 0.0],
///     color: [1.0, 0.0, 0.0],
/// };
/// assert_eq!(bytemuck::bytes_of(&vertex).len(), ColoredVertex::STRIDE);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColoredVertex {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// Linear RGB color [r, g, b]
    pub color: [f32; 3],
}

impl ColoredVertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = mem::size_of::<ColoredVertex>();
    /// Byte offset of `position` (shader location 0).
    pub const POSITION_OFFSET: usize = 0;
    /// Byte offset of `color` (shader location 1).
    pub const COLOR_OFFSET: usize = mem::size_of::<[f32; 3]>();
}
