//! # Scene Management Module
//!
//! The scene registry and the objects it owns.
//!
//! ## Key Components
//!
//! - [`Scene`] - Registry mapping [`ObjectId`]s to objects, with its own id counter
//! - [`SceneObject`] - Mesh handle, bounding box and transform of one placed object
//! - [`ColoredVertex`] - Vertex layout handed to the renderer
//!
//! ## Usage
//!
//! ```
//! use cgmath::Vector3;
//! use seisview::gfx::geometry::ObjectTemplate;
//! use seisview::gfx::scene::{MeshHandle, Scene};
//!
//! let mut scene = Scene::new();
//! let cube = ObjectTemplate::cube();
//! let id = scene.spawn(&cube, MeshHandle(0)).unwrap();
//!
//! let object = scene.get_mut(id).unwrap();
//! object.set_scale(Vector3::new(10.0, 10.0, 10.0)).unwrap();
//! object.set_location(Vector3::new(-10.0, 0.0, -50.0)).unwrap();
//! ```
//!
//! The renderer never mutates objects. Once per frame it reads
//! [`Scene::draw_list`] (or walks [`Scene::for_each_enabled`]) and issues its
//! own draw calls.

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{MeshHandle, ObjectId, ObjectUniform, SceneObject};
pub use scene::Scene;
pub use vertex::ColoredVertex;
