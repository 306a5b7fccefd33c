//! # Graphics Module
//!
//! Scene-side graphics logic: everything a renderer needs to know about
//! where objects are and where the camera looks, and everything the input
//! path needs to turn a click into a selected object. GPU work itself lives
//! outside this crate; it consumes [`CameraUniform`] and
//! [`scene::ObjectUniform`] values.
//!
//! ## Architecture Overview
//!
//! - **Transform** ([`transform`]) - Pivot-aware model matrices
//! - **Scene Management** ([`scene`]) - Object registry with stable ids
//! - **Geometry** ([`geometry`]) - Mesh templates with a topology tag
//! - **Camera System** ([`camera`]) - Orbit camera, projection and input routing
//! - **Picking** ([`picking`]) - Screen-to-ray unprojection and ray/OBB tests
//!
//! ## Usage
//!
//! ```
//! use seisview::gfx::{camera::OrbitCamera, geometry::ObjectTemplate, scene::{MeshHandle, Scene}};
//!
//! let mut scene = Scene::new();
//! let id = scene.spawn(&ObjectTemplate::cube(), MeshHandle(0)).unwrap();
//!
//! let mut camera = OrbitCamera::default();
//! camera.bind(id);
//! let eye = camera.eye_position(&scene).unwrap();
//! assert!(eye.y > 0.0);
//! ```

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use camera::{CameraUniform, OrbitCamera, Projection};
pub use picking::{ObjectPicker, PickResult};
