//! Seisview
//!
//! Scene core of an interactive 3D viewer: pivot-aware object transforms, an
//! orbit camera bound to a scene object, and click-to-select picking through
//! ray/OBB intersection. Windowing and GPU work stay with the embedding
//! application, which feeds winit events into a [`Viewport`].

pub mod error;
pub mod gfx;
pub mod options;
pub mod viewport;

// Re-export main types for convenience
pub use error::{
    CameraError, ClickError, OptionsError, PickingError, SceneError, TransformError, ViewportError,
};
pub use options::ViewerOptions;
pub use viewport::Viewport;

/// Creates a viewport with default options for a `width`x`height` surface.
pub fn default(width: u32, height: u32) -> Result<Viewport, ViewportError> {
    Viewport::new(ViewerOptions::default(), width, height)
}
